use crate::sim::SimTime;

#[test]
fn sim_time_unit_conversions() {
    assert_eq!(SimTime::from_units(1), SimTime(1_000));
    assert_eq!(SimTime::from_tenths(5), SimTime(500));
    assert_eq!(SimTime::from_units_f64(12.5), SimTime(12_500));
    assert_eq!(SimTime::from_units_f64(0.0), SimTime::ZERO);
    assert_eq!(SimTime::from_units_f64(-3.0), SimTime::ZERO);
}

#[test]
fn sim_time_unit_conversions_saturate_on_overflow() {
    assert_eq!(SimTime::from_units(u64::MAX), SimTime(u64::MAX));
    assert_eq!(SimTime::from_tenths(u64::MAX), SimTime(u64::MAX));
}

#[test]
fn trace_rendering_shows_first_decimal_only_when_nonzero() {
    assert_eq!(SimTime::from_units(7).to_string(), "7");
    assert_eq!(SimTime::from_units_f64(7.5).to_string(), "7.5");
    assert_eq!(SimTime::ZERO.to_string(), "0");
    assert_eq!(SimTime::from_units_f64(0.1).to_string(), "0.1");
    // 小数第二位不进入输出
    assert_eq!(SimTime(7_250).to_string(), "7.2");
}
