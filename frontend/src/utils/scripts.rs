use dioxus::{logger::tracing::{info, warn}, prelude::*};

pub const ECHARTS_SRC: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";
pub const LEAFLET_SRC: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

const MAP_HELPERS: &str = include_str!("../../assets/map.js");

fn loader_js(srcs: &[&str]) -> String {
  let list = serde_json::to_string(srcs).unwrap_or_else(|_| "[]".to_string());
  format!(
    r#"
    function loadScript(src) {{
      return new Promise(function(resolve, reject) {{
        const existing = document.querySelector('script[data-src="' + src + '"]');
        if (existing) {{
          if (existing.dataset.loaded) {{ resolve(); }} else {{ existing.addEventListener('load', resolve); }}
          return;
        }}
        const scriptElem = document.createElement('script');
        scriptElem.src = src;
        scriptElem.async = true;
        scriptElem.dataset.src = src;
        scriptElem.onload = function() {{ scriptElem.dataset.loaded = '1'; resolve(); }};
        scriptElem.onerror = function() {{ reject(`Error loading script: ${{src}}`); }};
        document.head.appendChild(scriptElem);
      }});
    }}
    const srcs = {list};
    srcs.reduce((chain, src) => chain.then(() => loadScript(src)), Promise.resolve())
      .then(() => dioxus.send(true))
      .catch((e) => {{ console.error(e); dioxus.send(false); }});
    "#
  )
}

/// Loads CDN scripts in order; the signal flips once every one has executed.
pub fn use_scripts(srcs: &'static [&'static str]) -> Signal<bool> {
  let mut ready = use_signal(|| false);

  use_future(move || async move {
    let mut eval = document::eval(&loader_js(srcs));
    match eval.recv::<bool>().await {
      Ok(true) => {
        if srcs.contains(&LEAFLET_SRC) {
          document::eval(MAP_HELPERS);
        }
        info!("loaded {} script(s)", srcs.len());
        ready.set(true);
      },
      Ok(false) => warn!("a script failed to load: {:?}", srcs),
      Err(e) => warn!("script loader did not answer: {:?}", e),
    }
  });
  ready
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn loader_embeds_sources_in_order() {
    let js = loader_js(&[LEAFLET_SRC, ECHARTS_SRC]);
    let leaflet = js.find(LEAFLET_SRC).unwrap();
    let echarts = js.find(ECHARTS_SRC).unwrap();
    assert!(leaflet < echarts);
    assert!(js.contains("dioxus.send(true)"));
  }
}
