use js_sys::{wasm_bindgen::JsCast, Array, Uint8Array};
use web_sys::{window, Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::server::{AppError, SimulationResult};

fn wasm_err(e: impl std::fmt::Debug) -> AppError {
  AppError::Wasm(format!("{:?}", e))
}

pub fn report_filename(result: &SimulationResult) -> String {
  let from = result.route.waypoints().first().map(|w| w.name.as_str()).unwrap_or("origin");
  let to = result.route.waypoints().last().map(|w| w.name.as_str()).unwrap_or("destination");
  let slug: String = format!("{}-{}-{}", from, to, result.mode.as_value())
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
    .collect();
  format!("tradesim-{}.pdf", slug.trim_matches('-'))
}

/// Hands `bytes` to the browser as a downloaded PDF file.
pub fn save_pdf(bytes: &[u8], filename: &str) -> Result<(), AppError> {
  let array = Uint8Array::new_with_length(bytes.len() as u32);
  array.copy_from(bytes);
  let parts = Array::new();
  parts.push(&array.buffer());

  let options = BlobPropertyBag::new();
  options.set_type("application/pdf");
  let blob = Blob::new_with_buffer_source_sequence_and_options(&parts, &options).map_err(wasm_err)?;
  let url = Url::create_object_url_with_blob(&blob).map_err(wasm_err)?;

  let document = window()
    .and_then(|w| w.document())
    .ok_or_else(|| AppError::Wasm("no document".to_string()))?;
  let anchor: HtmlAnchorElement = document
    .create_element("a")
    .map_err(wasm_err)?
    .dyn_into()
    .map_err(wasm_err)?;
  anchor.set_href(&url);
  anchor.set_download(filename);
  anchor.click();

  Url::revoke_object_url(&url).map_err(wasm_err)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::server::{LegMode, Route, RouteSource, TransportMode, Waypoint};

  #[test]
  fn filename_is_slugged() {
    let wp = |name: &str| Waypoint { lat: 0.0, lng: 0.0, name: name.to_string(), mode: LegMode::Sea, error: None };
    let result = SimulationResult {
      route: Route(vec![wp("Port of Shanghai"), wp("Los Angeles")]),
      estimate: None,
      mode: TransportMode::Sea,
      recommendations: vec![],
      risks: vec![],
      source: RouteSource::Agent
    };
    assert_eq!(report_filename(&result), "tradesim-port-of-shanghai-los-angeles-sea.pdf");
  }
}
