use rand::Rng;

const MAX_RAW_GOALS: u32 = 5;
const AVERAGE_STRENGTH: u32 = 100;

/// Score one fixture from the two sides' strengths.
///
/// Each side draws uniformly from `0..=5` and scales by `strength / 100`,
/// flooring the result. The draws are independent.
pub fn simulate_scores<R: Rng + ?Sized>(
    rng: &mut R,
    home_strength: u32,
    away_strength: u32,
) -> (u32, u32) {
    (
        scaled_goals(rng, home_strength),
        scaled_goals(rng, away_strength),
    )
}

fn scaled_goals<R: Rng + ?Sized>(rng: &mut R, strength: u32) -> u32 {
    let raw = rng.gen_range(0..=MAX_RAW_GOALS);
    // Integer division floors for non-negative operands.
    let scaled = u64::from(raw) * u64::from(strength) / u64::from(AVERAGE_STRENGTH);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
