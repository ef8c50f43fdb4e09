//! 效率估计性质测试
//!
//! 在一组代表性输入上验证估计器的不变量：
//! kV换算、单计数对称、接受度反比缩放、误差非负、退化行不崩溃。

use pmt_effcurve::core::{
    ColumnLayout, EfficiencyEstimator, MeasurementRow, MeasurementTable, fake_coincidences,
};

fn log(msg_zh: impl AsRef<str>, msg_en: impl AsRef<str>) {
    println!("{} / {}", msg_zh.as_ref(), msg_en.as_ref());
}

fn sample_rows() -> Vec<MeasurementRow> {
    let mut rows = Vec::new();
    for hv in [850.0, 1000.0, 1234.0, 1500.0, 2100.0] {
        for (t, c) in [(0.0, 40.0), (12.0, 40.0), (300.0, 512.0), (999.0, 1001.0)] {
            for (su, sd) in [(0.0, 0.0), (1500.0, 2300.0), (2.0e4, 3.5e4)] {
                rows.push(MeasurementRow {
                    hv_volts: hv,
                    triples: t,
                    couples: c,
                    singles_upper: su,
                    singles_lower: sd,
                });
            }
        }
    }
    rows
}

#[test]
fn test_hv_scaled_to_kilovolts() {
    log("HV换算测试", "HV conversion");
    let estimator = EfficiencyEstimator::default();
    for row in sample_rows() {
        let p = estimator.estimate_row(&row);
        assert!((p.hv_kv - row.hv_volts / 1000.0).abs() <= f64::EPSILON * row.hv_volts);
    }
}

#[test]
fn test_fake_coincidences_symmetric_in_singles() {
    log("偶然符合对称性测试", "Fake coincidence symmetry");
    let estimator = EfficiencyEstimator::default();
    for row in sample_rows() {
        let swapped = MeasurementRow {
            singles_upper: row.singles_lower,
            singles_lower: row.singles_upper,
            ..row
        };
        assert_eq!(
            estimator.estimate_row(&row),
            estimator.estimate_row(&swapped)
        );
        assert_eq!(
            fake_coincidences(row.singles_upper, row.singles_lower),
            fake_coincidences(row.singles_lower, row.singles_upper)
        );
    }
}

#[test]
fn test_acceptance_scaling() {
    log("接受度缩放测试", "Acceptance scaling");
    let base = EfficiencyEstimator::new(1.0);
    for k in [0.4, 0.5, 3.0] {
        let scaled = EfficiencyEstimator::new(k);
        for row in sample_rows() {
            let b = base.estimate_row(&row);
            let s = scaled.estimate_row(&row);
            assert!((s.efficiency - b.efficiency / k).abs() <= 1e-12 * b.efficiency.abs().max(1.0));
        }
    }
}

#[test]
fn test_error_real_and_non_negative_for_valid_rows() {
    log("误差非负测试", "Error non-negative");
    let estimator = EfficiencyEstimator::default();
    let mut checked = 0;
    for row in sample_rows() {
        let p = estimator.estimate_row(&row);
        let corrected = row.couples - p.fake_coincidences;
        if corrected > 0.0 && (0.0..=1.0).contains(&p.efficiency) {
            assert!(p.efficiency_error.is_finite());
            assert!(p.efficiency_error >= 0.0);
            checked += 1;
        }
    }
    assert!(checked > 0);
    log(format!("  已检查 {checked} 行"), format!("  checked {checked} rows"));
}

#[test]
fn test_corrected_count_zero_is_non_finite() {
    log("零分母测试", "Zero corrected count");
    let (su, sd) = (2.0e4, 3.5e4);
    let c = fake_coincidences(su, sd);
    let table = MeasurementTable::from_rows(vec![
        vec![1000.0, 10.0, 100.0, su, sd],
        vec![1100.0, 10.0, c, su, sd],
    ])
    .unwrap();

    let curve = EfficiencyEstimator::default().estimate(&table).unwrap();
    assert!(curve.efficiency[0].is_finite());
    assert!(!curve.efficiency[1].is_finite());
    assert_eq!(curve.degenerate_rows(), vec![1]);
}

#[test]
fn test_layout_permutation_equivalence() {
    log("列布局置换测试", "Layout permutation");
    let original = MeasurementTable::parse("1000 50 100 10000 100000\n1200 90 130 15000 90000\n").unwrap();
    let permuted = MeasurementTable::parse("100000 10000 100 50 1000\n90000 15000 130 90 1200\n").unwrap();

    let a = EfficiencyEstimator::default().estimate(&original).unwrap();
    let b = EfficiencyEstimator::default()
        .with_layout(ColumnLayout::new(4, 3, 2, 1, 0))
        .estimate(&permuted)
        .unwrap();
    assert_eq!(a, b);
}
