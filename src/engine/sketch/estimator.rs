//! Cardinality estimators for both sketch representations.

use super::sparse::SPARSE_SLOTS;

/// LogLog-Beta bias coefficients fitted at precision 14 and 16.
const BETA_14: [f64; 8] = [
    -0.370393911,
    0.070471823,
    0.17393686,
    0.16339839,
    -0.09237745,
    0.03738027,
    -0.005384159,
    0.00042419,
];

const BETA_16: [f64; 8] = [
    -0.37331876643753059,
    -1.41704077448122989,
    0.40729184796612533,
    1.56152033906584164,
    -0.99242233534286128,
    0.26064681399483092,
    -0.03053811369682807,
    0.00155770210179105,
];

pub fn alpha(m: f64) -> f64 {
    match m as u32 {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / m),
    }
}

/// Bias term for `ez` empty registers. Precisions below 16 use the p14 fit,
/// the rest the p16 fit.
pub fn beta(p: u8, ez: f64) -> f64 {
    let coeffs = if p < 16 { &BETA_14 } else { &BETA_16 };
    let zl = (ez + 1.0).ln();
    let mut acc = coeffs[0] * ez;
    let mut pow = 1.0;
    for c in &coeffs[1..] {
        pow *= zl;
        acc += c * pow;
    }
    acc
}

pub fn sum_and_zeros(regs: &[u8]) -> (f64, f64) {
    let mut sum = 0.0;
    let mut zeros = 0.0;
    for &r in regs {
        if r == 0 {
            zeros += 1.0;
        }
        sum += (-(r as f64)).exp2();
    }
    (sum, zeros)
}

/// Linear counting over the 2^25 sparse slots, `distinct` of which are taken.
/// Truncated rather than rounded, so small counts come out exact.
pub fn sparse_estimate(distinct: usize) -> u64 {
    let slots = SPARSE_SLOTS as f64;
    // ln(m / (m - n)) == -ln(1 - n/m), computed without cancellation.
    let est = -slots * (-(distinct as f64) / slots).ln_1p();
    est as u64
}

/// LogLog-Beta: `alpha * m * (m - ez) / (sum + beta(p, ez))`, rounded.
pub fn dense_estimate(p: u8, regs: &[u8]) -> u64 {
    let (sum, ez) = sum_and_zeros(regs);
    let m = regs.len() as f64;
    let est = alpha(m) * m * (m - ez) / (sum + beta(p, ez));
    (est + 0.5) as u64
}
