//! Sorts decoded signals by time of arrival so the neighbor index and
//! cluster engine can assume array position tracks time.

use tpx3recon_core::SignalRecord;

/// Sorts `signals` in place by `toa_final`, ascending.
pub fn sort_by_toa(signals: &mut [SignalRecord]) {
    signals.sort_by(|a, b| a.toa_final.partial_cmp(&b.toa_final).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpx3recon_core::SignalKind;

    #[test]
    fn sorts_ascending_by_toa() {
        let mut signals = vec![
            SignalRecord::new(1, SignalKind::Pixel, 0, 0, 3.0, 10),
            SignalRecord::new(1, SignalKind::Pixel, 0, 0, 1.0, 10),
            SignalRecord::new(1, SignalKind::Pixel, 0, 0, 2.0, 10),
        ];
        sort_by_toa(&mut signals);
        let toas: Vec<f64> = signals.iter().map(|s| s.toa_final).collect();
        assert_eq!(toas, vec![1.0, 2.0, 3.0]);
    }
}
