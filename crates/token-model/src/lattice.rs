//! The fixed color step lattice
//!
//! Every color family shares the same 16 ascending named rungs. Step names
//! are stable identifiers interpreted as numbers for offset arithmetic, even
//! though the spacing between rungs is uneven.

/// The 16 lattice steps in ascending order.
pub const STEPS: [u16; 16] = [
    5, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 200, 300, 400, 500, 600,
];

/// Operations over the fixed step lattice.
pub struct StepLattice;

impl StepLattice {
    /// Smallest rung.
    pub const MIN: u16 = STEPS[0];

    /// Largest rung.
    pub const MAX: u16 = STEPS[STEPS.len() - 1];

    /// Whether `step` is one of the 16 rungs.
    pub fn contains(step: u16) -> bool {
        STEPS.contains(&step)
    }

    /// Snap a target to the nearest rung.
    ///
    /// The lattice is scanned low-to-high and a later candidate only wins
    /// with a strictly smaller distance, so exact ties snap to the smaller
    /// rung. Downstream exports depend on this exact policy.
    pub fn nearest(target: i32) -> u16 {
        let mut best = STEPS[0];
        for &step in STEPS.iter().skip(1) {
            if (i32::from(step) - target).abs() < (i32::from(best) - target).abs() {
                best = step;
            }
        }
        best
    }

    /// Clamp a target into the lattice range, then snap to the nearest rung.
    pub fn clamp_and_snap(target: i32) -> u16 {
        let clamped = target.clamp(i32::from(Self::MIN), i32::from(Self::MAX));
        Self::nearest(clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_ascending() {
        assert!(STEPS.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(STEPS.len(), 16);
    }

    #[test]
    fn test_contains() {
        assert!(StepLattice::contains(5));
        assert!(StepLattice::contains(600));
        assert!(!StepLattice::contains(150));
    }

    #[test]
    fn test_nearest_exact() {
        assert_eq!(StepLattice::nearest(70), 70);
        assert_eq!(StepLattice::nearest(400), 400);
    }

    #[test]
    fn test_nearest_tie_prefers_smaller_rung() {
        // 150 is equidistant from 100 and 200; the scan keeps the first hit
        assert_eq!(StepLattice::nearest(150), 100);
        // 15 is equidistant from 10 and 20
        assert_eq!(StepLattice::nearest(15), 10);
    }

    #[test]
    fn test_clamp_and_snap() {
        assert_eq!(StepLattice::clamp_and_snap(-5), 5);
        assert_eq!(StepLattice::clamp_and_snap(1000), 600);
        assert_eq!(StepLattice::clamp_and_snap(95), 90);
    }
}
