#![allow(non_snake_case)]

use charming::{
  component::{Axis, Grid, Legend, Title},
  element::{AxisLabel, AxisType, Color, LineStyle, SplitLine, TextStyle, Tooltip, Trigger},
  series::{Bar, Pie},
  Chart, WasmRenderer
};
use dioxus::{logger::tracing::warn, prelude::*};

use crate::utils::server::{ModeShare, MonthlyVolume};

static CANVAS_ID_VOLUME: &str = "monthly-volume";
static CANVAS_ID_SPLIT: &str = "mode-split";

const BACKGROUND: &str = "rgba(41,52,65,1)";

fn title(text: &str) -> Title {
  Title::new()
    .text(text)
    .text_style(
      TextStyle::new()
      .color("rgba(255, 255, 255, 1)")
      .font_family("Arial")
      .font_size(18)
    )
    .padding((12, 0, 5, 20))
}

pub fn volume_series(data: &[MonthlyVolume]) -> (Vec<String>, Vec<i64>) {
  data.iter().map(|m| (m.month.clone(), m.shipments as i64)).unzip()
}

pub fn split_series(data: &[ModeShare]) -> (Vec<(f64, String)>, Vec<Color>) {
  data
    .iter()
    .map(|s| ((s.share_pct, s.mode.to_string()), Color::Value(s.mode.color().to_string())))
    .unzip()
}

fn resize_on_window_change(id: &str) {
  document::eval(&format!(
    r#"
    var millis = 250;
    setTimeout(function() {{
        const element = document.getElementById('{id}');
        if (!element || typeof echarts === 'undefined') {{ return; }}
        var chart = echarts.getInstanceByDom(element);
        if (!chart) {{ return; }}
        window.addEventListener('resize', function() {{
            chart.resize();
        }});
    }}, millis)
    "#
  ));
}

#[component]
pub fn VolumeChart(data: ReadOnlySignal<Vec<MonthlyVolume>>, ready: ReadOnlySignal<bool>) -> Element {
  let renderer = use_signal(|| WasmRenderer::new_opt(None, Some(320)));

  use_effect(move || {
    if !ready() || data.read().is_empty() {
      return;
    }
    let (months, shipments) = volume_series(&data.read());

    let chart = Chart::new()
    .title(title("Monthly shipments"))
    .background_color(BACKGROUND)
    .color(vec![Color::Value("#72ccff".to_string())])
    .tooltip(Tooltip::new().trigger(Trigger::Axis))
    .grid(
      Grid::new()
      .contain_label(true)
      .left("6%")
      .right("6%")
      .bottom("8%")
    )
    .x_axis(
      Axis::new()
      .type_(AxisType::Category)
      .data(months)
      .axis_label(AxisLabel::new().color("#aaaaaa"))
    )
    .y_axis(
      Axis::new()
      .type_(AxisType::Value)
      .split_line(
        SplitLine::new()
        .line_style(
          LineStyle::new()
          .color("#737373")
        )
      )
      .axis_label(AxisLabel::new().color("#aaaaaa"))
    )
    .series(
      Bar::new()
      .name("Shipments")
      .data(shipments)
    );

    if let Err(e) = renderer.read_unchecked().render(CANVAS_ID_VOLUME, &chart) {
      warn!("volume chart failed to render: {:?}", e);
    }
  });

  rsx! {
    div {
      id: CANVAS_ID_VOLUME,
      class: "chart",
      onmounted: move |_evt| resize_on_window_change(CANVAS_ID_VOLUME)
    }
  }
}

#[component]
pub fn ModeSplitChart(data: ReadOnlySignal<Vec<ModeShare>>, ready: ReadOnlySignal<bool>) -> Element {
  let renderer = use_signal(|| WasmRenderer::new_opt(None, Some(320)));

  use_effect(move || {
    if !ready() || data.read().is_empty() {
      return;
    }
    let (shares, colors) = split_series(&data.read());

    let chart = Chart::new()
    .title(title("Mode split"))
    .background_color(BACKGROUND)
    .color(colors)
    .tooltip(
      Tooltip::new()
      .trigger(Trigger::Item)
      .formatter("{b}: {c}%")
    )
    .legend(
      Legend::new()
      .bottom("4%")
      .text_style(TextStyle::new().color("#dddddd"))
    )
    .series(
      Pie::new()
      .name("Share")
      .radius(vec!["40%", "65%"])
      .data(shares)
    );

    if let Err(e) = renderer.read_unchecked().render(CANVAS_ID_SPLIT, &chart) {
      warn!("mode split chart failed to render: {:?}", e);
    }
  });

  rsx! {
    div {
      id: CANVAS_ID_SPLIT,
      class: "chart",
      onmounted: move |_evt| resize_on_window_change(CANVAS_ID_SPLIT)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::server::LegMode;

  #[test]
  fn volume_series_keeps_month_order() {
    let data = vec![
      MonthlyVolume { month: "Jan".to_string(), shipments: 120 },
      MonthlyVolume { month: "Feb".to_string(), shipments: 95 },
    ];
    let (months, shipments) = volume_series(&data);
    assert_eq!(months, vec!["Jan", "Feb"]);
    assert_eq!(shipments, vec![120, 95]);
  }

  #[test]
  fn split_series_colors_follow_modes() {
    let data = vec![
      ModeShare { mode: LegMode::Sea, share_pct: 60.0 },
      ModeShare { mode: LegMode::Air, share_pct: 40.0 },
    ];
    let (shares, colors) = split_series(&data);
    assert_eq!(shares[0], (60.0, "Sea".to_string()));
    assert_eq!(colors.len(), 2);
  }
}
