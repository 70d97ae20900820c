//! Per-frame translation and scale normalization.

/// Center a frame's points on their mean and divide by their spread.
///
/// x and y are handled independently: each axis is shifted by its mean over
/// the frame's joints and divided by its population standard deviation plus
/// `eps`. The input is copied; the caller's frame is never modified.
/// A trailing odd value is ignored.
#[must_use]
pub fn center_and_scale(coords: &[f64], eps: f64) -> Vec<f64> {
    let n = coords.len() / 2;
    let mut out: Vec<f64> = coords[..n * 2].to_vec();
    if n == 0 {
        return out;
    }

    for axis in 0..2 {
        let mean = out.iter().skip(axis).step_by(2).sum::<f64>() / n as f64;
        let var = out
            .iter()
            .skip(axis)
            .step_by(2)
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        let scale = var.sqrt() + eps;

        for v in out.iter_mut().skip(axis).step_by(2) {
            *v = (*v - mean) / scale;
        }
    }

    out
}
