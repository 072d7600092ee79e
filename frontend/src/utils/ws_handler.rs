use std::collections::VecDeque;
use dioxus::{logger::tracing::{info, warn}, prelude::*};
use gloo_net::websocket::{futures::WebSocket, Message};
use futures_util::StreamExt;
use futures::{stream::SplitSink, SinkExt};

use super::{
  server::{AppError, LaneTick, WsRequest, WsResponse},
  sim_client::{health, open_ticker}
};

pub const TICKER_CAPACITY: usize = 25;

pub type TickerSink = SplitSink<WebSocket, Message>;

/// Newest ticks first, never more than `cap` kept.
pub fn push_ticks(buffer: &mut VecDeque<LaneTick>, ticks: Vec<LaneTick>, cap: usize) {
  for tick in ticks {
    buffer.push_front(tick);
  }
  buffer.truncate(cap);
}

fn encode(request: &WsRequest) -> Result<Message, AppError> {
  serde_json::to_string(request)
    .map(Message::Text)
    .map_err(|e| AppError::Deserialize(e.to_string()))
}

pub async fn send_request(ws_conn: &mut Signal<Option<TickerSink>>, request: WsRequest) -> Result<(), AppError> {
  let msg = encode(&request)?;
  let mut sink = ws_conn.write().take().ok_or_else(|| AppError::Network("ticker is not connected".to_string()))?;
  let sent = sink.send(msg).await.map_err(|e| AppError::Network(e.to_string()));
  *ws_conn.write() = Some(sink);
  sent
}

/// Connects, starts the feed and pumps ticks into `ticks` until the socket closes.
pub async fn handle_ticker(interval_ms: u64,
  mut ws_conn: Signal<Option<TickerSink>>,
  mut ticks: Signal<VecDeque<LaneTick>>,
  mut live: Signal<bool>) -> Result<(), AppError> {

  let status = health().await?;
  info!("simulation service health: {}", status.status);

  let ws = open_ticker().await?;
  let (mut write, mut read) = ws.split();
  write.send(encode(&WsRequest::Start { interval_ms })?).await.map_err(|e| AppError::Network(e.to_string()))?;
  info!("ticker started at {}ms", interval_ms);

  *ws_conn.write() = Some(write);
  live.set(true);

  while let Some(Ok(server_msg)) = read.next().await {
    let Message::Text(s) = server_msg else {
      continue;
    };
    match serde_json::from_str::<WsResponse>(&s) {
      Ok(WsResponse::Tick { ticks: batch }) => push_ticks(&mut ticks.write(), batch, TICKER_CAPACITY),
      Ok(WsResponse::Error { message }) => {
        live.set(false);
        ws_conn.set(None);
        return Err(AppError::Http { status: 400, message });
      },
      Err(e) => warn!("skipping malformed ticker frame: {}", e),
    }
  }

  live.set(false);
  ws_conn.set(None);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal::Decimal;
  use crate::utils::server::LegMode;

  fn tick(lane: &str, timestamp: u64) -> LaneTick {
    LaneTick {
      lane: lane.to_string(),
      mode: LegMode::Sea,
      rate: Decimal::new(182_50, 2),
      change_pct: 0.4,
      eta_days: 28.0,
      timestamp
    }
  }

  #[test]
  fn newest_ticks_come_first() {
    let mut buffer = VecDeque::new();
    push_ticks(&mut buffer, vec![tick("Shanghai - Rotterdam", 1)], 5);
    push_ticks(&mut buffer, vec![tick("Busan - Los Angeles", 2)], 5);
    assert_eq!(buffer.front().map(|t| t.timestamp), Some(2));
  }

  #[test]
  fn buffer_is_capped() {
    let mut buffer = VecDeque::new();
    push_ticks(&mut buffer, (0..10).map(|i| tick("Mumbai - Dubai", i)).collect(), 4);
    assert_eq!(buffer.len(), 4);
    assert_eq!(buffer.back().map(|t| t.timestamp), Some(6));
  }

  #[test]
  fn start_requests_are_tagged() {
    let Message::Text(s) = encode(&WsRequest::Start { interval_ms: 1000 }).unwrap() else {
      panic!("expected a text frame");
    };
    assert_eq!(s, r#"{"type":"Start","interval_ms":1000}"#);
  }
}
