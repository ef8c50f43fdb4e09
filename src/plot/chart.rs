//! 效率曲线图表
//!
//! 纯展示层：把 (x, y, y误差) 画成带误差棒的散点图，固定坐标轴标签并开启网格。
//! 非有限点在绘制时跳过，坐标范围只由有限值决定。

use crate::error::{EffError, EffResult, render_error};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

/// X轴标签
pub const X_LABEL: &str = "HV [kV]";

/// Y轴标签
pub const Y_LABEL: &str = "Efficiency [Pure]";

/// 默认画布尺寸（像素）
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (800, 600);

/// 默认误差棒端帽大小（磅）
pub const DEFAULT_CAPSIZE: f64 = 3.0;

/// 磅 → 像素（100 dpi）
const PIXELS_PER_POINT: f64 = 100.0 / 72.0;

/// 坐标范围两侧留白比例
const RANGE_MARGIN: f64 = 0.05;

/// 数据点颜色
const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);

/// 数据点标记样式（沿用常见的单字符格式写法）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerStyle {
    /// `.`
    #[default]
    Point,
    /// `o`
    Circle,
    /// `s`
    Square,
    /// `^`
    Triangle,
    /// `x`
    Cross,
}

impl MarkerStyle {
    /// 对应的格式字符
    pub fn symbol(&self) -> char {
        match self {
            Self::Point => '.',
            Self::Circle => 'o',
            Self::Square => 's',
            Self::Triangle => '^',
            Self::Cross => 'x',
        }
    }

    /// 标记半径（像素）
    fn radius(&self) -> i32 {
        match self {
            Self::Point => 3,
            Self::Circle | Self::Square => 5,
            Self::Triangle | Self::Cross => 6,
        }
    }
}

impl FromStr for MarkerStyle {
    type Err = EffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "." => Ok(Self::Point),
            "o" => Ok(Self::Circle),
            "s" => Ok(Self::Square),
            "^" => Ok(Self::Triangle),
            "x" => Ok(Self::Cross),
            other => Err(EffError::InvalidInput(format!(
                "不支持的标记样式 / unsupported marker style: '{other}' (支持 / supported: . o s ^ x)"
            ))),
        }
    }
}

/// 输出图像格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// 文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// 根据文件扩展名识别格式
    pub fn from_path(path: &Path) -> EffResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for ImageFormat {
    type Err = EffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(EffError::InvalidInput(format!(
                "不支持的图像格式 / unsupported image format: '{other}' (支持 / supported: png, svg)"
            ))),
        }
    }
}

/// 绘图样式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotStyle {
    pub marker: MarkerStyle,
    /// 误差棒端帽大小（磅）
    pub capsize: f64,
    pub canvas_size: (u32, u32),
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            marker: MarkerStyle::default(),
            capsize: DEFAULT_CAPSIZE,
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl PlotStyle {
    /// 端帽总宽度（像素）
    pub fn cap_width_px(&self) -> u32 {
        (self.capsize * 2.0 * PIXELS_PER_POINT).round() as u32
    }
}

/// 绘制前整理好的数据（只含有限点）
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// (x, y, y误差)
    pub points: Vec<(f64, f64, f64)>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    /// 因非有限值被跳过的点数
    pub skipped: usize,
}

impl ChartData {
    fn prepare(x: &[f64], y: &[f64], y_err: &[f64]) -> Self {
        let mut points = Vec::with_capacity(x.len());
        let mut skipped = 0;

        for ((&xi, &yi), &ei) in x.iter().zip(y).zip(y_err) {
            if xi.is_finite() && yi.is_finite() && ei.is_finite() {
                points.push((xi, yi, ei.abs()));
            } else {
                skipped += 1;
            }
        }

        let x_range = padded_range(points.iter().map(|&(x, _, _)| (x, x)));
        let y_range = padded_range(points.iter().map(|&(_, y, e)| (y - e, y + e)));

        Self {
            points,
            x_range,
            y_range,
            skipped,
        }
    }
}

/// 由 (下界, 上界) 序列求留白后的范围；无数据或零跨度时回退
fn padded_range(bounds: impl Iterator<Item = (f64, f64)>) -> Range<f64> {
    let (lo, hi) = bounds.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
        (lo.min(a), hi.max(b))
    });

    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }

    let span = hi - lo;
    if span <= 0.0 {
        let half = if lo == 0.0 { 0.5 } else { lo.abs() * RANGE_MARGIN };
        return (lo - half)..(hi + half);
    }

    (lo - span * RANGE_MARGIN)..(hi + span * RANGE_MARGIN)
}

/// 可渲染/保存的效率曲线图
#[derive(Debug, Clone)]
pub struct EfficiencyChart {
    title: String,
    style: PlotStyle,
    data: ChartData,
}

/// 构建效率曲线图
///
/// x、y、y误差必须等长；端帽大小必须为非负有限值。
pub fn plot_efficiency(
    x: &[f64],
    y: &[f64],
    y_err: &[f64],
    title: &str,
    style: PlotStyle,
) -> EffResult<EfficiencyChart> {
    if x.len() != y.len() || y.len() != y_err.len() {
        return Err(EffError::InvalidInput(format!(
            "序列长度不一致 / sequence lengths differ: x={}, y={}, y_err={}",
            x.len(),
            y.len(),
            y_err.len()
        )));
    }

    if !style.capsize.is_finite() || style.capsize < 0.0 {
        return Err(EffError::InvalidInput(format!(
            "端帽大小必须为非负数 / capsize must be non-negative: {}",
            style.capsize
        )));
    }

    Ok(EfficiencyChart {
        title: title.to_string(),
        style,
        data: ChartData::prepare(x, y, y_err),
    })
}

impl EfficiencyChart {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// 保存图像，后端由扩展名决定（png / svg）
    pub fn save(&self, path: &Path) -> EffResult<()> {
        let format = ImageFormat::from_path(path)?;
        let size = self.style.canvas_size;

        match format {
            ImageFormat::Png => self.draw_on(BitMapBackend::new(path, size).into_drawing_area()),
            ImageFormat::Svg => self.draw_on(SVGBackend::new(path, size).into_drawing_area()),
        }
    }

    fn draw_on<DB>(&self, root: DrawingArea<DB, Shift>) -> EffResult<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(|e| render_error("画布填充 / fill", e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(65)
            .build_cartesian_2d(self.data.x_range.clone(), self.data.y_range.clone())
            .map_err(|e| render_error("坐标系 / coordinates", e))?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .x_label_formatter(&|x| format!("{x:.2}"))
            .y_label_formatter(&|y| format!("{y:.2}"))
            .draw()
            .map_err(|e| render_error("网格 / mesh", e))?;

        let cap = self.style.cap_width_px();
        chart
            .draw_series(self.data.points.iter().map(|&(x, y, e)| {
                ErrorBar::new_vertical(x, y - e, y, y + e, SERIES_COLOR.filled(), cap)
            }))
            .map_err(|e| render_error("误差棒 / error bars", e))?;

        let r = self.style.marker.radius();
        let points = self.data.points.iter().map(|&(x, y, _)| (x, y));
        let drawn = match self.style.marker {
            MarkerStyle::Point | MarkerStyle::Circle => chart
                .draw_series(points.map(|p| Circle::new(p, r, SERIES_COLOR.filled())))
                .map(|_| ()),
            MarkerStyle::Square => chart
                .draw_series(points.map(|p| {
                    EmptyElement::at(p) + Rectangle::new([(-r, -r), (r, r)], SERIES_COLOR.filled())
                }))
                .map(|_| ()),
            MarkerStyle::Triangle => chart
                .draw_series(points.map(|p| TriangleMarker::new(p, r, SERIES_COLOR.filled())))
                .map(|_| ()),
            MarkerStyle::Cross => chart
                .draw_series(points.map(|p| Cross::new(p, r, SERIES_COLOR.stroke_width(2))))
                .map(|_| ()),
        };
        drawn.map_err(|e| render_error("数据点 / markers", e))?;

        root.present().map_err(|e| render_error("输出 / present", e))?;
        Ok(())
    }
}
