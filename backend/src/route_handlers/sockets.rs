use std::time::Duration;
use axum::{
  extract::{ws::{self, CloseFrame, Message, Utf8Bytes, WebSocket}, WebSocketUpgrade}, response::IntoResponse, Extension
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::{sync::mpsc, task::JoinHandle, time};
use tracing::{debug, info, warn};

use crate::{market_gen::gen::{LaneTick, MarketSimulator}, midwares::app_state::RequestContext};

pub const MIN_INTERVAL_MS: u64 = 200;
pub const MAX_INTERVAL_MS: u64 = 5_000;
const TICKS_PER_BATCH: usize = 4;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum WsRequest {
  Start { interval_ms: u64 },
  Stop
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum WsResponse {
  Tick { ticks: Vec<LaneTick> },
  Error { message: String }
}

pub fn clamp_interval(interval_ms: u64) -> Duration {
  Duration::from_millis(interval_ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS))
}

pub async fn ws_handler (
  ws: WebSocketUpgrade,
  Extension(ctx): Extension<RequestContext>,
) -> impl IntoResponse {

  let RequestContext { remote_ip, user_agent, timestamp, signature, .. } = ctx;
  debug!("ticker upgrade from {} ({})", remote_ip, user_agent);

  ws.protocols([signature, timestamp])
    .on_upgrade(move|socket| handle_socket(socket, remote_ip))
}

async fn handle_socket(socket: WebSocket, who: String) {

  let (mut sender, mut receiver) = socket.split();
  let (tx, mut rx) = mpsc::channel::<Vec<LaneTick>>(64);
  let mut producer: Option<JoinHandle<()>> = None;

  loop {
    tokio::select! {
      msg = receiver.next() => {
        let Some(Ok(client_msg)) = msg else {
          info!("{} went away", who);
          break;
        };
        match client_msg {
          Message::Text(t) => {
            debug!(">>> {} sent string: {:?}", who, t);

            match serde_json::from_str::<WsRequest>(t.as_str()) {
              Ok(WsRequest::Start { interval_ms }) => {
                let interval = clamp_interval(interval_ms);
                info!("{} started the ticker every {:?}", who, interval);
                // a second Start restarts the stream with the new interval
                if let Some(handle) = producer.take() {
                  handle.abort();
                }
                producer = Some(tokio::spawn(produce_ticks(tx.clone(), interval)));
              },
              Ok(WsRequest::Stop) => {
                info!(">>> {} requested STOP", who);
                graceful_ws_closure(sender, ws::close_code::NORMAL, "client requested to stop ticker").await;
                break;
              },
              Err(e) => {
                warn!("{} sent an unreadable message: {}", who, e);
                if send_json(&mut sender, &WsResponse::Error { message: e.to_string() }).await.is_err() {
                  break;
                }
              }
            }
          },
          Message::Close(_c) => {
            info!(">> {} sent CloseFrame msg", who);
            break;
          },
          _ => debug!(">> {} sent Binary, Ping or Pong", who)
        }
      }

      Some(ticks) = rx.recv() => {
        if send_json(&mut sender, &WsResponse::Tick { ticks }).await.is_err() {
          break;
        }
      }
    }
  }

  if let Some(handle) = producer {
    handle.abort();
  }
  info!("Websocket context destroyed for: {}", who);
}

async fn produce_ticks(tx: mpsc::Sender<Vec<LaneTick>>, interval: Duration) {
  let mut simulator = match MarketSimulator::new() {
    Ok(s) => s,
    Err(e) => {
      warn!("ticker could not start: {}", e);
      return;
    }
  };

  let mut clock = time::interval(interval);
  loop {
    clock.tick().await;
    if tx.send(simulator.ticks(TICKS_PER_BATCH)).await.is_err() {
      debug!("ticker receiver dropped, producer exiting");
      return;
    }
  }
}

async fn send_json(sender: &mut SplitSink<WebSocket, Message>, payload: &WsResponse) -> Result<(), axum::Error> {
  let text = serde_json::to_string(payload).map_err(axum::Error::new)?;
  sender.send(Message::text(text)).await
}

// helper to close the Websocket gracefully
async fn graceful_ws_closure(mut sender: SplitSink<WebSocket, Message>, code: u16, reason_str: &'static str) {
  if let Err(e) = sender.send(Message::Close(Some(CloseFrame {
    code,
    reason: Utf8Bytes::from_static(reason_str)
  }))).await {
    warn!("error sending close frame: {:?}", e);
  }
  // flush to ensure all messages are sent
  if let Err(e) = sender.flush().await {
    warn!("error flushing sender: {:?}", e);
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn intervals_are_clamped() {
    assert_eq!(clamp_interval(10), Duration::from_millis(200));
    assert_eq!(clamp_interval(1_000), Duration::from_millis(1_000));
    assert_eq!(clamp_interval(60_000), Duration::from_millis(5_000));
  }

  #[test]
  fn client_messages_parse() {
    assert!(matches!(
      serde_json::from_str::<WsRequest>(r#"{"type":"Start","interval_ms":750}"#),
      Ok(WsRequest::Start { interval_ms: 750 })
    ));
    assert!(matches!(serde_json::from_str::<WsRequest>(r#"{"type":"Stop"}"#), Ok(WsRequest::Stop)));
    assert!(serde_json::from_str::<WsRequest>(r#"{"type":"Pause"}"#).is_err());
  }

  #[test]
  fn ticks_are_tagged() {
    let json = serde_json::to_value(WsResponse::Tick { ticks: vec![] }).unwrap();
    assert_eq!(json["type"], "Tick");
    assert!(json["ticks"].as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn producer_stops_when_the_receiver_drops() {
    let (tx, rx) = mpsc::channel(1);
    drop(rx);
    // returns instead of looping forever
    time::timeout(Duration::from_secs(2), produce_ticks(tx, Duration::from_millis(200))).await.unwrap();
  }
}
