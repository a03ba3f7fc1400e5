// SVG line chart renderer for the charging chart model
use crate::domain::chart::ChartModel;
use std::fmt::Write;

const MARGIN_TOP: f64 = 5.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_LEFT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 25.0;
const Y_AXIS_WIDTH: f64 = 60.0;
const X_AXIS_HEIGHT: f64 = 30.0;
const Y_TICKS: [u8; 5] = [0, 25, 50, 75, 100];

const GRID_COLOR: &str = "#ccc";
const AXIS_COLOR: &str = "#666";
const DOT_RADIUS: f64 = 4.0;

#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub stroke: String,
}

/// Plot area in pixels, inside margins and axes
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    fn new(style: &ChartStyle) -> Self {
        let left = MARGIN_LEFT + Y_AXIS_WIDTH;
        let top = MARGIN_TOP;
        Self {
            left,
            top,
            width: (style.width as f64 - left - MARGIN_RIGHT).max(1.0),
            height: (style.height as f64 - top - MARGIN_BOTTOM - X_AXIS_HEIGHT).max(1.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    // Points sit on a category axis: evenly spaced by index, edge to edge
    fn x(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.left + self.width / 2.0;
        }
        self.left + self.width * index as f64 / (count - 1) as f64
    }

    fn y(&self, level: u8, domain: [u8; 2]) -> f64 {
        let [min, max] = domain;
        let span = (max.saturating_sub(min)).max(1) as f64;
        let ratio = (level.clamp(min, max) - min) as f64 / span;
        self.bottom() - self.height * ratio
    }
}

/// Render the chart as a standalone `<svg>` element.
///
/// Each data point carries a `<title>` with the tooltip lines, which browsers
/// show on hover.
pub fn render_svg(chart: &ChartModel, style: &ChartStyle) -> String {
    let area = PlotArea::new(style);
    let count = chart.points.len();
    let mut svg = String::new();

    // fmt::Write into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{title}">"#,
        w = style.width,
        h = style.height,
        title = escape(&chart.title),
    );

    // Grid
    let _ = writeln!(svg, r#"<g class="grid" stroke="{}" stroke-dasharray="3 3">"#, GRID_COLOR);
    for tick in Y_TICKS {
        let y = area.y(tick, chart.y_domain);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
            area.left,
            y,
            area.right(),
            y
        );
    }
    for index in 0..count {
        let x = area.x(index, count);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
            x,
            area.top,
            x,
            area.bottom()
        );
    }
    svg.push_str("</g>\n");

    // Axes
    let _ = writeln!(
        svg,
        r#"<g class="axes" stroke="{c}"><line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}"/><line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}"/></g>"#,
        c = AXIS_COLOR,
        l = area.left,
        r = area.right(),
        t = area.top,
        b = area.bottom(),
    );

    let _ = writeln!(
        svg,
        r#"<g class="y-ticks" fill="{}" font-size="12" text-anchor="end">"#,
        AXIS_COLOR
    );
    for tick in Y_TICKS {
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" dy="4">{}</text>"#,
            area.left - 8.0,
            area.y(tick, chart.y_domain),
            tick
        );
    }
    svg.push_str("</g>\n");

    let _ = writeln!(
        svg,
        r#"<g class="x-ticks" fill="{}" font-size="12" text-anchor="middle">"#,
        AXIS_COLOR
    );
    for (index, point) in chart.points.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}">{}</text>"#,
            area.x(index, count),
            area.bottom() + 18.0,
            escape(&point.tick_label)
        );
    }
    svg.push_str("</g>\n");

    let _ = writeln!(
        svg,
        r#"<text class="x-label" x="{:.1}" y="{:.1}" text-anchor="middle">Time</text>"#,
        area.left + area.width / 2.0,
        style.height as f64 - 5.0
    );
    let label_y = area.top + area.height / 2.0;
    let _ = writeln!(
        svg,
        r#"<text class="y-label" x="{x:.1}" y="{y:.1}" text-anchor="middle" transform="rotate(-90 {x:.1} {y:.1})">Charging Level (%)</text>"#,
        x = MARGIN_LEFT,
        y = label_y,
    );

    // Line and dots
    if count > 0 {
        let coords: Vec<String> = chart
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                format!(
                    "{:.1},{:.1}",
                    area.x(index, count),
                    area.y(point.level, chart.y_domain)
                )
            })
            .collect();
        let _ = writeln!(
            svg,
            r#"<polyline class="line" fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
            escape(&style.stroke),
            coords.join(" ")
        );
    }

    for (index, point) in chart.points.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<circle class="dot" cx="{:.1}" cy="{:.1}" r="{}" fill="{}"><title>{}</title></circle>"#,
            area.x(index, count),
            area.y(point.level, chart.y_domain),
            DOT_RADIUS,
            escape(&style.stroke),
            escape(&point.tooltip.lines().join("\n"))
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape text for use in XML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
