#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::utils::{
  playground::{preset_ports, Place, PlaygroundState},
  server::TransportMode
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Endpoint {
  Origin,
  Destination
}

fn set_endpoint(state: &mut PlaygroundState, which: Endpoint, place: Option<Place>) {
  match which {
    Endpoint::Origin => state.origin = place,
    Endpoint::Destination => state.destination = place,
  }
  state.clear_outcome();
}

#[component]
fn PortSelect(label: &'static str, which: Endpoint, state: Signal<PlaygroundState>) -> Element {
  let mut state = state;
  let ports = use_hook(preset_ports);
  let current = match which {
    Endpoint::Origin => state.read().origin.clone(),
    Endpoint::Destination => state.read().destination.clone(),
  };
  let selected = current.as_ref().map(|p| p.name.clone()).unwrap_or_default();
  let custom = current.filter(|p| !ports.iter().any(|port| port.name == p.name));
  let choices = ports.clone();

  rsx! {
    label {
      class: "field",
      "{label}",
      select {
        value: "{selected}",
        onchange: move |evt| {
          let name = evt.value();
          let place = choices.iter().find(|p| p.name == name).cloned();
          set_endpoint(&mut state.write(), which, place);
        },
        option { value: "", "Choose a port or click the map" }
        if let Some(place) = custom {
          option { value: "{place.name}", "Map pick: {place.name}" }
        }
        for port in ports {
          option { value: "{port.name}", "{port.name}" }
        }
      }
    }
  }
}

#[component]
pub fn SimForm(
  state: Signal<PlaygroundState>,
  pending: ReadOnlySignal<bool>,
  on_simulate: EventHandler<()>,
  on_reset: EventHandler<()>
) -> Element {
  let mut state = state;
  let mode = state.read().mode;
  let volume = state.read().volume;
  let volume_text = if volume.is_finite() { volume.to_string() } else { String::new() };
  let urgent = state.read().urgent;

  rsx! {
    form {
      class: "sim-form",
      onsubmit: move |evt: FormEvent| {
        evt.prevent_default();
        on_simulate.call(());
      },
      PortSelect { label: "Origin", which: Endpoint::Origin, state }
      PortSelect { label: "Destination", which: Endpoint::Destination, state }
      fieldset {
        class: "mode-picker",
        legend { "Transport mode" }
        for option in TransportMode::ALL {
          label {
            class: if option == mode { "mode-option active" } else { "mode-option" },
            input {
              r#type: "radio",
              name: "mode",
              value: option.as_value(),
              checked: option == mode,
              onchange: move |evt| {
                if let Some(m) = TransportMode::from_value(&evt.value()) {
                  let mut s = state.write();
                  s.mode = m;
                  s.clear_outcome();
                }
              }
            }
            "{option}"
          }
        }
      }
      label {
        class: "field",
        "Volume (m³)",
        input {
          r#type: "number",
          min: "0.1",
          step: "0.1",
          value: "{volume_text}",
          oninput: move |evt| {
            // an unparsable entry becomes NaN so the request check rejects it
            state.write().volume = evt.value().parse::<f64>().unwrap_or(f64::NAN);
          }
        }
      }
      label {
        class: "checkbox",
        input {
          r#type: "checkbox",
          checked: urgent,
          onchange: move |evt| state.write().urgent = evt.checked()
        }
        "Urgent shipment"
      }
      div {
        class: "sim-actions",
        button {
          class: "button button-primary",
          r#type: "submit",
          disabled: pending(),
          if pending() { "Simulating..." } else { "Simulate" }
        }
        button {
          class: "button button-ghost",
          r#type: "button",
          onclick: move |_| on_reset.call(()),
          "Reset"
        }
      }
    }
  }
}
