//! # SVG Export
//!
//! Renders the layout schematic as a self-contained SVG document: plot,
//! supply train (tank, pump, filter, valve), mainline, laterals, emitters,
//! smart controller, soil sensors, dimension lines, legend and title block.
//!
//! All styling is inlined in a `<style>` block and `<defs>`; the document
//! references nothing outside itself.
//!
//! ## Example
//!
//! ```rust
//! use drip_core::calculations::calculate_system;
//! use drip_core::export::svg::render_svg;
//! use drip_core::params::default_params;
//!
//! let params = default_params();
//! let svg = render_svg(&params, &calculate_system(&params));
//! assert!(svg.starts_with("<?xml"));
//! assert!(svg.trim_end().ends_with("</svg>"));
//! ```

pub mod element;

use chrono::{Local, NaiveDate};

use crate::calculations::CalculatedValues;
use crate::layout::{Layout, Point, Viewport};
use crate::numfmt::{fixed, num};
use crate::params::IrrigationParams;

pub use element::Element;

/// Pixels per meter
pub const DEFAULT_SCALE: f64 = 50.0;

/// Margin around the plot, in pixels
pub const DEFAULT_PADDING: f64 = 150.0;

const STYLESHEET: &str = "
    .title { font-family: 'IBM Plex Sans', Arial, sans-serif; font-size: 16px; font-weight: 600; fill: #1e293b; }
    .subtitle { font-family: 'IBM Plex Sans', Arial, sans-serif; font-size: 11px; fill: #64748b; }
    .label { font-family: 'IBM Plex Mono', monospace; font-size: 9px; fill: #64748b; }
    .dim { font-family: 'IBM Plex Mono', monospace; font-size: 10px; fill: #475569; }
    .component-label { font-family: 'IBM Plex Mono', monospace; font-size: 7px; fill: #1e293b; font-weight: 500; }
    .legend-text { font-family: 'IBM Plex Sans', Arial, sans-serif; font-size: 8px; fill: #475569; }
    .spec-text { font-family: 'IBM Plex Mono', monospace; font-size: 8px; fill: #64748b; }
  ";

const DIM_STROKE: &str = "#64748b";
const LATERAL_STROKE: &str = "#06b6d4";
const MAINLINE_STROKE: &str = "#3b82f6";
const EMITTER_FILL: &str = "#10b981";
const SENSOR_STROKE: &str = "#0ea5e9";

/// Rendering options for [`render_svg_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Pixels per meter
    pub scale: f64,
    /// Margin around the plot, in pixels
    pub padding: f64,
    /// Date printed in the title block
    pub generated_on: NaiveDate,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions {
            scale: DEFAULT_SCALE,
            padding: DEFAULT_PADDING,
            generated_on: Local::now().date_naive(),
        }
    }
}

impl SvgOptions {
    /// Viewport that places the plot's near corner at (padding, padding).
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scale, self.padding, self.padding)
    }
}

/// Render the schematic with default scale and today's date.
pub fn render_svg(params: &IrrigationParams, calc: &CalculatedValues) -> String {
    render_svg_with(params, calc, &SvgOptions::default())
}

/// Render the schematic with explicit options.
pub fn render_svg_with(params: &IrrigationParams, calc: &CalculatedValues, options: &SvgOptions) -> String {
    let root = build_svg(params, calc, options);
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    root.write(&mut out, 0);
    log::debug!(
        "rendered SVG: {} laterals, {} emitters, {} bytes",
        calc.num_laterals,
        calc.total_emitters,
        out.len()
    );
    out
}

/// Build the document tree without serializing it.
pub fn build_svg(params: &IrrigationParams, calc: &CalculatedValues, options: &SvgOptions) -> Element {
    let layout = Layout::new(params, calc);
    let vp = options.viewport();
    let frame = Frame::new(&layout, &vp, options);

    let mut svg = Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", format!("{}mm", num(frame.svg_width)))
        .attr("height", format!("{}mm", num(frame.svg_height)))
        .attr(
            "viewBox",
            format!("0 0 {} {}", num(frame.svg_width), num(frame.svg_height)),
        );

    svg.push(defs(options.scale));
    svg.push(Element::new("style").text(STYLESHEET));

    svg.comment("Background");
    svg.push(
        Element::new("rect")
            .attr("width", "100%")
            .attr("height", "100%")
            .attr("fill", "#fafafa"),
    );

    svg.comment("Title Block");
    svg.push(
        Element::new("g")
            .attr("transform", "translate(20, 25)")
            .child(Element::new("text").attr("class", "title").text("Smart Drip Irrigation System Layout"))
            .child(
                Element::new("text")
                    .attr("class", "subtitle")
                    .attr("y", "18")
                    .text(format!(
                        "Parametric Design - Generated {}",
                        options.generated_on.format("%Y-%m-%d")
                    )),
            ),
    );

    svg.comment("Plot Area with Grid");
    for fill in ["url(#grid)", "url(#waterGrad)"] {
        let mut rect = Element::new("rect")
            .num("x", frame.plot_x)
            .num("y", frame.plot_y)
            .num("width", frame.plot_w)
            .num("height", frame.plot_h)
            .attr("fill", fill);
        if fill == "url(#grid)" {
            rect = rect.attr("stroke", "#94a3b8").attr("stroke-width", "2");
        }
        svg.push(rect.attr("rx", "4"));
    }

    supply_train(&mut svg, params, &frame);
    mainline(&mut svg, params, &layout, &vp);

    svg.comment("Laterals and Emitters");
    for lateral in &layout.laterals {
        svg.comment(format!("Lateral {}", lateral.index + 1));
        let start = vp.point(lateral.segment.start);
        let end = vp.point(lateral.segment.end);
        svg.push(
            line(start, end, LATERAL_STROKE, "2.5").attr("stroke-linecap", "round"),
        );
        svg.push(circle(start, 5.0, LATERAL_STROKE, "#0891b2"));
        for emitter in lateral.emitters() {
            svg.push(circle(vp.point(emitter.position), 4.0, EMITTER_FILL, "#059669"));
        }
    }

    controller_and_sensors(&mut svg, &layout, &vp, &frame);
    dimensions(&mut svg, params, &frame);

    svg.comment("North Arrow");
    svg.push(
        Element::new("g")
            .attr("transform", translate(frame.svg_width - 40.0, 50.0))
            .child(Element::new("polygon").attr("points", "0,-20 6,-5 0,-10 -6,-5").attr("fill", DIM_STROKE))
            .child(
                Element::new("text")
                    .attr("class", "label")
                    .attr("text-anchor", "middle")
                    .attr("y", "-25")
                    .text("N"),
            ),
    );

    svg.comment("Legend");
    svg.push(legend(params, calc, &frame));

    svg.comment("Scale");
    svg.push(
        Element::new("g")
            .attr("transform", translate(frame.svg_width - 120.0, frame.svg_height - 25.0))
            .child(
                Element::new("text")
                    .attr("class", "label")
                    .attr("text-anchor", "end")
                    .text(format!("Scale 1:{}", num((1000.0 / options.scale).round()))),
            ),
    );

    svg
}

/// Pixel frame of the drawing.
struct Frame {
    plot_x: f64,
    plot_y: f64,
    plot_w: f64,
    plot_h: f64,
    mainline_x: f64,
    svg_width: f64,
    svg_height: f64,
}

impl Frame {
    fn new(layout: &Layout, vp: &Viewport, options: &SvgOptions) -> Self {
        let plot_w = vp.length(layout.plot_length_m);
        let plot_h = vp.length(layout.plot_width_m);
        Frame {
            plot_x: vp.x(0.0),
            plot_y: vp.y(0.0),
            plot_w,
            plot_h,
            mainline_x: vp.x(layout.mainline_x()),
            svg_width: plot_w + options.padding * 2.0 + 100.0,
            svg_height: plot_h + options.padding * 2.0 + 180.0,
        }
    }

    fn right(&self) -> f64 {
        self.plot_x + self.plot_w
    }

    fn bottom(&self) -> f64 {
        self.plot_y + self.plot_h
    }
}

fn translate(x: f64, y: f64) -> String {
    format!("translate({}, {})", num(x), num(y))
}

fn line(start: Point, end: Point, stroke: &str, width: &str) -> Element {
    Element::new("line")
        .num("x1", start.x)
        .num("y1", start.y)
        .num("x2", end.x)
        .num("y2", end.y)
        .attr("stroke", stroke)
        .attr("stroke-width", width)
}

fn circle(center: Point, r: f64, fill: &str, stroke: &str) -> Element {
    Element::new("circle")
        .num("cx", center.x)
        .num("cy", center.y)
        .num("r", r)
        .attr("fill", fill)
        .attr("stroke", stroke)
        .attr("stroke-width", "1")
}

fn label(class: &'static str, y: &str, text: impl Into<String>) -> Element {
    Element::new("text")
        .attr("class", class)
        .attr("text-anchor", "middle")
        .attr("y", y.to_string())
        .text(text)
}

fn defs(scale: f64) -> Element {
    let grid_path = format!("M {s} 0 L 0 0 0 {s}", s = num(scale));
    Element::new("defs")
        .child(
            Element::new("marker")
                .attr("id", "arrow-end")
                .attr("markerWidth", "8")
                .attr("markerHeight", "6")
                .attr("refX", "8")
                .attr("refY", "3")
                .attr("orient", "auto")
                .child(Element::new("polygon").attr("points", "0,0 8,3 0,6").attr("fill", DIM_STROKE)),
        )
        .child(
            Element::new("marker")
                .attr("id", "arrow-start")
                .attr("markerWidth", "8")
                .attr("markerHeight", "6")
                .attr("refX", "0")
                .attr("refY", "3")
                .attr("orient", "auto")
                .child(Element::new("polygon").attr("points", "8,0 0,3 8,6").attr("fill", DIM_STROKE)),
        )
        .child(
            Element::new("pattern")
                .attr("id", "grid")
                .num("width", scale)
                .num("height", scale)
                .attr("patternUnits", "userSpaceOnUse")
                .child(
                    Element::new("path")
                        .attr("d", grid_path)
                        .attr("fill", "none")
                        .attr("stroke", "#e2e8f0")
                        .attr("stroke-width", "0.5"),
                ),
        )
        .child(
            Element::new("linearGradient")
                .attr("id", "waterGrad")
                .attr("x1", "0%")
                .attr("y1", "0%")
                .attr("x2", "0%")
                .attr("y2", "100%")
                .child(
                    Element::new("stop")
                        .attr("offset", "0%")
                        .attr("style", "stop-color:#3b82f6;stop-opacity:0.3"),
                )
                .child(
                    Element::new("stop")
                        .attr("offset", "100%")
                        .attr("style", "stop-color:#3b82f6;stop-opacity:0.1"),
                ),
        )
}

/// Tank, pump and filter stacked above the mainline head, with their pipes.
fn supply_train(svg: &mut Element, params: &IrrigationParams, frame: &Frame) {
    let x = frame.mainline_x - 20.0;
    let top = frame.plot_y;

    svg.comment("Tank");
    svg.push(
        Element::new("g")
            .attr("transform", translate(x, top - 70.0))
            .child(
                Element::new("rect")
                    .attr("x", "-20")
                    .attr("y", "-20")
                    .attr("width", "40")
                    .attr("height", "40")
                    .attr("rx", "4")
                    .attr("fill", "#dbeafe")
                    .attr("stroke", MAINLINE_STROKE)
                    .attr("stroke-width", "2"),
            )
            .child(label("component-label", "2", "TANK"))
            .child(label("spec-text", "12", format!("{}L", num(params.tank_capacity_l)))),
    );

    svg.comment("Pump");
    svg.push(
        Element::new("g")
            .attr("transform", translate(x, top - 25.0))
            .child(
                Element::new("circle")
                    .attr("r", "12")
                    .attr("fill", "#fef3c7")
                    .attr("stroke", "#f59e0b")
                    .attr("stroke-width", "2"),
            )
            .child(label("component-label", "3", "P")),
    );

    svg.comment("Filter");
    let mut filter = Element::new("g").attr("transform", translate(x, top + 5.0)).child(
        Element::new("rect")
            .attr("x", "-10")
            .attr("y", "-8")
            .attr("width", "20")
            .attr("height", "16")
            .attr("rx", "2")
            .attr("fill", "#dcfce7")
            .attr("stroke", "#22c55e")
            .attr("stroke-width", "1.5"),
    );
    for slot in [-4.0, 0.0, 4.0] {
        filter.push(line(Point::new(slot, -8.0), Point::new(slot, 8.0), "#22c55e", "1"));
    }
    svg.push(filter);

    svg.comment("Connection pipes from tank to mainline");
    svg.push(line(Point::new(x, top - 50.0), Point::new(x, top - 37.0), DIM_STROKE, "3"));
    svg.push(line(Point::new(x, top - 13.0), Point::new(x, top - 3.0), DIM_STROKE, "3"));
    svg.push(line(Point::new(x, top + 13.0), Point::new(x, top), MAINLINE_STROKE, "3"));
    svg.push(line(Point::new(x, top), Point::new(frame.mainline_x, top), MAINLINE_STROKE, "4"));
}

fn mainline(svg: &mut Element, params: &IrrigationParams, layout: &Layout, vp: &Viewport) {
    let start = vp.point(layout.mainline.start);
    let end = vp.point(layout.mainline.end);
    let label_x = start.x - 35.0;
    let label_y = (start.y + end.y) / 2.0;

    svg.comment("Mainline");
    svg.push(line(start, end, MAINLINE_STROKE, "5").attr("stroke-linecap", "round"));
    svg.push(
        Element::new("text")
            .attr("class", "label")
            .num("x", label_x)
            .num("y", label_y)
            .attr("text-anchor", "middle")
            .attr(
                "transform",
                format!("rotate(-90, {}, {})", num(label_x), num(label_y)),
            )
            .text(format!("Mainline {}mm PVC", num(params.mainline_diameter_mm))),
    );

    svg.comment("Solenoid Valve");
    svg.push(
        Element::new("g")
            .attr("transform", translate(start.x, start.y - 15.0))
            .child(valve_half("-8,-6 0,6 8,-6"))
            .child(valve_half("-8,6 0,-6 8,6")),
    );
}

fn valve_half(points: &str) -> Element {
    Element::new("polygon")
        .attr("points", points.to_string())
        .attr("fill", "#e0e7ff")
        .attr("stroke", "#6366f1")
        .attr("stroke-width", "1.5")
}

fn controller_and_sensors(svg: &mut Element, layout: &Layout, vp: &Viewport, frame: &Frame) {
    let ctrl = Point::new(frame.right() + 40.0, frame.plot_y + frame.plot_h / 2.0);

    svg.comment("Smart Controller");
    let mut controller = Element::new("g")
        .attr("transform", translate(ctrl.x, ctrl.y))
        .child(
            Element::new("rect")
                .attr("x", "-25")
                .attr("y", "-20")
                .attr("width", "50")
                .attr("height", "40")
                .attr("rx", "4")
                .attr("fill", "#f1f5f9")
                .attr("stroke", DIM_STROKE)
                .attr("stroke-width", "1.5"),
        )
        .child(label("component-label", "-5", "SMART"))
        .child(label("component-label", "5", "CTRL"))
        .child(Element::new("circle").attr("cy", "14").attr("r", "4").attr("fill", "#22c55e"));
    // Signal wires to each sensor, in controller-local coordinates
    for sensor in &layout.sensors {
        let s = vp.point(*sensor);
        controller.push(
            line(Point::new(-25.0, 0.0), Point::new(s.x - ctrl.x, s.y - ctrl.y), "#94a3b8", "1")
                .attr("stroke-dasharray", "4,2"),
        );
    }
    svg.push(controller);

    svg.comment("Soil Moisture Sensors");
    for (n, sensor) in layout.sensors.iter().enumerate() {
        let s = vp.point(*sensor);
        svg.push(
            Element::new("g")
                .attr("transform", translate(s.x, s.y))
                .attr("data-sensor", format!("S{}", n + 1))
                .child(
                    Element::new("circle")
                        .attr("r", "10")
                        .attr("fill", "none")
                        .attr("stroke", SENSOR_STROKE)
                        .attr("stroke-width", "2")
                        .attr("stroke-dasharray", "4,2"),
                )
                .child(
                    Element::new("circle")
                        .attr("r", "5")
                        .attr("fill", SENSOR_STROKE)
                        .attr("opacity", "0.3"),
                )
                .child(label("component-label", "3", format!("S{}", n + 1))),
        );
    }
}

fn dimension_line(start: Point, end: Point) -> Element {
    line(start, end, DIM_STROKE, "1")
        .attr("marker-start", "url(#arrow-start)")
        .attr("marker-end", "url(#arrow-end)")
}

fn dimensions(svg: &mut Element, params: &IrrigationParams, frame: &Frame) {
    svg.comment("Dimension Lines");

    let y = frame.bottom() + 40.0;
    svg.comment("Horizontal");
    svg.push(dimension_line(Point::new(frame.plot_x, y), Point::new(frame.right(), y)));
    for x in [frame.plot_x, frame.right()] {
        svg.push(line(Point::new(x, y - 5.0), Point::new(x, y + 5.0), DIM_STROKE, "1"));
    }
    svg.push(
        Element::new("text")
            .attr("class", "dim")
            .num("x", frame.plot_x + frame.plot_w / 2.0)
            .num("y", y + 15.0)
            .attr("text-anchor", "middle")
            .text(format!("{} m", num(params.plot_length_m))),
    );

    let x = frame.right() + 80.0;
    svg.comment("Vertical");
    svg.push(dimension_line(Point::new(x, frame.plot_y), Point::new(x, frame.bottom())));
    for y in [frame.plot_y, frame.bottom()] {
        svg.push(line(Point::new(x - 5.0, y), Point::new(x + 5.0, y), DIM_STROKE, "1"));
    }
    let text_x = x + 15.0;
    let text_y = frame.plot_y + frame.plot_h / 2.0;
    svg.push(
        Element::new("text")
            .attr("class", "dim")
            .num("x", text_x)
            .num("y", text_y)
            .attr("text-anchor", "middle")
            .attr("transform", format!("rotate(90, {}, {})", num(text_x), num(text_y)))
            .text(format!("{} m", num(params.plot_width_m))),
    );
}

fn legend_text(x: f64, text: String) -> Element {
    Element::new("text")
        .attr("class", "legend-text")
        .num("x", x)
        .attr("y", "11")
        .text(text)
}

fn legend(params: &IrrigationParams, calc: &CalculatedValues, frame: &Frame) -> Element {
    Element::new("g")
        .attr("transform", translate(frame.plot_x, frame.bottom() + 75.0))
        .child(
            Element::new("rect")
                .attr("x", "-5")
                .attr("y", "-12")
                .num("width", frame.plot_w + 10.0)
                .attr("height", "50")
                .attr("rx", "4")
                .attr("fill", "#ffffff")
                .attr("stroke", "#e2e8f0")
                .attr("stroke-width", "1"),
        )
        .child(Element::new("circle").attr("cx", "15").attr("cy", "8").attr("r", "5").attr("fill", MAINLINE_STROKE))
        .child(legend_text(
            28.0,
            format!("Mainline ({}mm PVC)", num(params.mainline_diameter_mm)),
        ))
        .child(
            line(Point::new(120.0, 8.0), Point::new(145.0, 8.0), LATERAL_STROKE, "2.5"),
        )
        .child(legend_text(
            153.0,
            format!("Lateral ({}mm PE)", num(params.lateral_diameter_mm)),
        ))
        .child(Element::new("circle").attr("cx", "265").attr("cy", "8").attr("r", "4").attr("fill", EMITTER_FILL))
        .child(legend_text(
            275.0,
            format!("Emitter ({} L/h)", num(params.emitter_flow_lph)),
        ))
        .child(
            Element::new("circle")
                .attr("cx", "365")
                .attr("cy", "8")
                .attr("r", "6")
                .attr("fill", "none")
                .attr("stroke", SENSOR_STROKE)
                .attr("stroke-width", "1.5")
                .attr("stroke-dasharray", "3,1"),
        )
        .child(legend_text(378.0, "Soil Sensor".to_string()))
        .child(
            Element::new("text")
                .attr("class", "spec-text")
                .attr("x", "5")
                .attr("y", "30")
                .text(summary_line(params, calc)),
        )
}

/// One-line system summary printed under the legend.
pub fn summary_line(params: &IrrigationParams, calc: &CalculatedValues) -> String {
    format!(
        "Total Emitters: {} | Flow Rate: {} L/min | TDH: {} bar | Tank: {}L",
        calc.total_emitters,
        fixed(calc.total_flow_lpm, 2),
        fixed(calc.total_dynamic_head_bar, 2),
        num(params.tank_capacity_l)
    )
}
