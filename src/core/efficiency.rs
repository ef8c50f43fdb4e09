//! 效率估计核心引擎
//!
//! 效率 = 三重符合 / (接受度 × (双重符合 − 偶然符合))，误差取二项分布标准误：
//! `sqrt(eff * (1 - eff) / (C - C_fake))`。
//!
//! 逐行独立计算，不做任何数值保护：分母为零得到非有限效率，
//! 效率超出 [0, 1] 时误差为 NaN，由调用方从结果中识别坏行。
//! 接受度 A ≠ 1 时二项误差只是近似，这里保持原公式不做修正。

use crate::core::acceptance::DEFAULT_ACCEPTANCE;
use crate::core::measurement::{ColumnLayout, MeasurementRow, MeasurementTable};
use crate::error::EffResult;
use serde::Serialize;

/// 偶然符合系数：20 ns 符合窗口 / 100 s 归一化，合并为单一常数
pub const FAKE_COINCIDENCE_FACTOR: f64 = 8e-10;

/// 伏特 → 千伏
pub const VOLTS_TO_KILOVOLTS: f64 = 1e-3;

/// 由上下PMT单计数估计偶然双重符合
#[inline]
pub fn fake_coincidences(singles_upper: f64, singles_lower: f64) -> f64 {
    singles_upper * singles_lower * FAKE_COINCIDENCE_FACTOR
}

/// 单个HV点的效率结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EfficiencyPoint {
    pub hv_kv: f64,
    pub efficiency: f64,
    pub efficiency_error: f64,
    pub fake_coincidences: f64,
}

impl EfficiencyPoint {
    /// 效率与误差均为有限值
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.hv_kv.is_finite() && self.efficiency.is_finite() && self.efficiency_error.is_finite()
    }
}

/// 效率曲线（四个等长平行序列，每个输入行一个元素）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EfficiencyCurve {
    pub hv_kv: Vec<f64>,
    pub efficiency: Vec<f64>,
    pub efficiency_error: Vec<f64>,
    pub fake_coincidences: Vec<f64>,
}

impl EfficiencyCurve {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            hv_kv: Vec::with_capacity(capacity),
            efficiency: Vec::with_capacity(capacity),
            efficiency_error: Vec::with_capacity(capacity),
            fake_coincidences: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, point: EfficiencyPoint) {
        self.hv_kv.push(point.hv_kv);
        self.efficiency.push(point.efficiency);
        self.efficiency_error.push(point.efficiency_error);
        self.fake_coincidences.push(point.fake_coincidences);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hv_kv.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hv_kv.is_empty()
    }

    /// 按行迭代
    pub fn points(&self) -> impl Iterator<Item = EfficiencyPoint> + '_ {
        (0..self.len()).map(move |i| EfficiencyPoint {
            hv_kv: self.hv_kv[i],
            efficiency: self.efficiency[i],
            efficiency_error: self.efficiency_error[i],
            fake_coincidences: self.fake_coincidences[i],
        })
    }

    /// 效率或误差为非有限值的行索引
    pub fn degenerate_rows(&self) -> Vec<usize> {
        self.points()
            .enumerate()
            .filter(|(_, p)| !p.is_finite())
            .map(|(i, _)| i)
            .collect()
    }

    /// 有限点中效率最高的一点（并列时取HV最先出现者）
    pub fn peak_efficiency(&self) -> Option<EfficiencyPoint> {
        self.points()
            .filter(EfficiencyPoint::is_finite)
            .fold(None, |best: Option<EfficiencyPoint>, p| match best {
                Some(b) if b.efficiency >= p.efficiency => Some(b),
                _ => Some(p),
            })
    }
}

/// 效率估计器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyEstimator {
    acceptance: f64,
    layout: ColumnLayout,
}

impl Default for EfficiencyEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTANCE)
    }
}

impl EfficiencyEstimator {
    pub fn new(acceptance: f64) -> Self {
        Self {
            acceptance,
            layout: ColumnLayout::default(),
        }
    }

    /// 覆盖默认列布局
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    #[inline]
    pub fn acceptance(&self) -> f64 {
        self.acceptance
    }

    #[inline]
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// 单行计算
    pub fn estimate_row(&self, row: &MeasurementRow) -> EfficiencyPoint {
        let fake = fake_coincidences(row.singles_upper, row.singles_lower);
        let corrected = row.couples - fake;
        let efficiency = row.triples / (self.acceptance * corrected);
        let efficiency_error = (efficiency * (1.0 - efficiency) / corrected).sqrt();

        EfficiencyPoint {
            hv_kv: row.hv_volts * VOLTS_TO_KILOVOLTS,
            efficiency,
            efficiency_error,
            fake_coincidences: fake,
        }
    }

    /// 整表计算
    ///
    /// 只在表格列数不满足列布局时失败；数值退化行照常输出。
    pub fn estimate(&self, table: &MeasurementTable) -> EffResult<EfficiencyCurve> {
        let rows = table.measurements(&self.layout)?;
        let mut curve = EfficiencyCurve::with_capacity(rows.len());
        for row in &rows {
            curve.push(self.estimate_row(row));
        }
        Ok(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(hv: f64, t: f64, c: f64, su: f64, sd: f64) -> MeasurementRow {
        MeasurementRow {
            hv_volts: hv,
            triples: t,
            couples: c,
            singles_upper: su,
            singles_lower: sd,
        }
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_fake_coincidence_value() {
        assert_close(fake_coincidences(1000.0, 1000.0), 8e-4, 1e-15);
        assert_close(fake_coincidences(1e4, 1e5), 0.8, 1e-12);
    }

    #[test]
    fn test_fake_coincidence_symmetric() {
        assert_eq!(
            fake_coincidences(1234.0, 98765.0),
            fake_coincidences(98765.0, 1234.0)
        );
    }

    #[test]
    fn test_reference_row() {
        // C_fake = 1e4 * 1e5 * 8e-10 = 0.8
        let estimator = EfficiencyEstimator::default();
        let p = estimator.estimate_row(&row(1000.0, 50.0, 100.0, 1e4, 1e5));
        assert_close(p.fake_coincidences, 0.8, 1e-12);
        assert_close(p.efficiency, 50.0 / 99.2, 1e-12);
        assert_close(p.efficiency, 0.50403, 1e-5);
        assert_close(p.efficiency_error, 0.0502, 1e-4);
        assert_eq!(p.hv_kv, 1.0);
    }

    #[test]
    fn test_small_singles_negligible_correction() {
        let p = EfficiencyEstimator::default().estimate_row(&row(1000.0, 50.0, 100.0, 1000.0, 1000.0));
        assert_close(p.fake_coincidences, 8e-4, 1e-15);
        assert_close(p.efficiency, 50.0 / (100.0 - 8e-4), 1e-12);
        assert_close(p.efficiency_error, 0.05, 1e-5);
    }

    #[test]
    fn test_acceptance_scales_inverse() {
        let r = row(1500.0, 40.0, 90.0, 2000.0, 3000.0);
        let base = EfficiencyEstimator::new(1.0).estimate_row(&r);
        for k in [0.4, 0.5, 2.0, 10.0] {
            let scaled = EfficiencyEstimator::new(k).estimate_row(&r);
            assert_close(scaled.efficiency, base.efficiency / k, 1e-12);
            assert_eq!(scaled.fake_coincidences, base.fake_coincidences);
        }
    }

    #[test]
    fn test_zero_denominator_non_finite() {
        let (su, sd) = (1e4, 1e5);
        let c = fake_coincidences(su, sd);
        let estimator = EfficiencyEstimator::default();

        let p = estimator.estimate_row(&row(1000.0, 5.0, c, su, sd));
        assert!(!p.efficiency.is_finite());

        let p = estimator.estimate_row(&row(1000.0, 0.0, c, su, sd));
        assert!(p.efficiency.is_nan());
    }

    #[test]
    fn test_efficiency_above_one_gives_nan_error() {
        let p = EfficiencyEstimator::default().estimate_row(&row(1000.0, 150.0, 100.0, 0.0, 0.0));
        assert!(p.efficiency > 1.0);
        assert!(p.efficiency_error.is_nan());
    }

    #[test]
    fn test_error_real_for_valid_rows() {
        let estimator = EfficiencyEstimator::default();
        for (t, c) in [(0.0, 10.0), (10.0, 10.0), (3.0, 17.0), (999.0, 1000.0)] {
            let p = estimator.estimate_row(&row(1200.0, t, c, 0.0, 0.0));
            assert!((0.0..=1.0).contains(&p.efficiency));
            assert!(p.efficiency_error.is_finite());
            assert!(p.efficiency_error >= 0.0);
        }
    }

    #[test]
    fn test_estimate_table_and_layout_override() {
        let table = MeasurementTable::parse(
            "900 10 100 1000 1000\n1000 50 100 1000 1000\n1100 80 100 1000 1000\n",
        )
        .unwrap();
        let curve = EfficiencyEstimator::default().estimate(&table).unwrap();
        assert_eq!(curve.len(), 3);
        for (kv, volts) in curve.hv_kv.iter().zip([900.0, 1000.0, 1100.0]) {
            assert_close(*kv, volts / 1000.0, 1e-15);
        }
        assert!(curve.degenerate_rows().is_empty());
        let peak = curve.peak_efficiency().unwrap();
        assert_close(peak.hv_kv, 1.1, 1e-15);

        // 上下单计数列互换不影响结果
        let swapped = EfficiencyEstimator::default()
            .with_layout(ColumnLayout::new(0, 1, 2, 4, 3))
            .estimate(&table)
            .unwrap();
        assert_eq!(swapped, curve);
    }

    #[test]
    fn test_degenerate_rows_reported_not_dropped() {
        let table = MeasurementTable::parse("1000 50 100 0 0\n1100 5 0 0 0\n1200 150 100 0 0").unwrap();
        let curve = EfficiencyEstimator::default().estimate(&table).unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.degenerate_rows(), vec![1, 2]);
        assert_close(curve.peak_efficiency().unwrap().hv_kv, 1.0, 1e-15);
    }

    #[test]
    fn test_layout_mismatch_is_error() {
        let table = MeasurementTable::parse("1000 50 100").unwrap();
        assert!(EfficiencyEstimator::default().estimate(&table).is_err());
    }
}
