#![allow(non_snake_case)]

use std::collections::VecDeque;
use dioxus::{logger::tracing::info, prelude::*};
use futures_util::StreamExt;

use crate::utils::{
  server::{LaneTick, WsRequest},
  toast::use_toasts,
  ws_handler::{handle_ticker, send_request, TickerSink}
};

const INTERVALS_MS: [u64; 4] = [500, 1000, 2000, 5000];

enum Action {
  Start,
  Stop
}

#[component]
pub fn LaneTicker() -> Element {
  let mut toasts = use_toasts();
  let ws_conn: Signal<Option<TickerSink>> = use_signal(|| None);
  let mut ticks: Signal<VecDeque<LaneTick>> = use_signal(VecDeque::new);
  let mut live = use_signal(|| false);
  let mut interval_ms = use_signal(|| 1000u64);

  let ticker = use_coroutine(move |mut rx| async move {
    let mut ws_conn = ws_conn;
    while let Some(action) = rx.next().await {
      match action {
        Action::Start => {
          if ws_conn.read().is_some() {
            // already connected, the server restarts the feed at the new pace
            match send_request(&mut ws_conn, WsRequest::Start { interval_ms: interval_ms() }).await {
              Ok(()) => live.set(true),
              Err(e) => toasts.error(&e),
            }
            continue;
          }
          ticks.write().clear();
          spawn(async move {
            if let Err(e) = handle_ticker(interval_ms(), ws_conn, ticks, live).await {
              toasts.error(&e);
            }
          });
        },
        Action::Stop => {
          info!("stopping ticker");
          match send_request(&mut ws_conn, WsRequest::Stop).await {
            Ok(()) => live.set(false),
            Err(e) => toasts.error(&e),
          }
        }
      }
    }
  });

  rsx! {
    div {
      class: "ticker",
      div {
        class: "ticker-header",
        h3 { "Live lane rates" }
        span { class: if live() { "ticker-status live" } else { "ticker-status" }, if live() { "LIVE" } else { "OFFLINE" } }
        select {
          value: "{interval_ms}",
          onchange: move |evt| {
            if let Ok(v) = evt.value().parse::<u64>() {
              interval_ms.set(v);
            }
          },
          for ms in INTERVALS_MS {
            option { value: "{ms}", "every {ms} ms" }
          }
        }
        button { class: "button button-primary", onclick: move |_| ticker.send(Action::Start), "Start" }
        button { class: "button button-ghost", disabled: !live(), onclick: move |_| ticker.send(Action::Stop), "Stop" }
      }
      table {
        class: "ticker-table",
        thead {
          tr {
            th { "Lane" }
            th { "Mode" }
            th { "Rate (USD/m³)" }
            th { "Change" }
            th { "ETA" }
          }
        }
        tbody {
          for tick in ticks.read().iter().cloned() {
            tr {
              key: "{tick.lane}-{tick.timestamp}",
              td { "{tick.lane}" }
              td { "{tick.mode}" }
              td { "{tick.rate}" }
              td {
                class: if tick.change_pct >= 0.0 { "up" } else { "down" },
                {format!("{:+.2}%", tick.change_pct)}
              }
              td { {format!("{:.1} d", tick.eta_days)} }
            }
          }
        }
      }
      if ticks.read().is_empty() {
        p { class: "muted", "Press Start to stream lane rates." }
      }
    }
  }
}
