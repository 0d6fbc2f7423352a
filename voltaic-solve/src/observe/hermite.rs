use voltaic_core::Segment;

use super::Error;

/// Reconstructs the state vector at time `t` by cubic Hermite interpolation
/// over the segment interval covering `t`.
///
/// The basis weights are computed once per query time and applied across the
/// whole state vector. Reconstruction is exact whenever the underlying
/// trajectory is cubic on the interval, which is what makes the stored
/// `(y, yp)` pairs a faithful dense output. Times outside the segment
/// extrapolate with the nearest interval's polynomial.
///
/// # Errors
///
/// Returns an error if the segment stores no derivative columns.
pub(super) fn interpolate_state(segment: &Segment, t: f64, out: &mut [f64]) -> Result<(), Error> {
    if !segment.has_derivatives() {
        return Err(Error::DerivativesUnavailable);
    }

    if segment.n_times() == 1 {
        out.copy_from_slice(segment.state_at(0));
        return Ok(());
    }

    let i = segment.interval_of(t);
    let t0 = segment.times()[i];
    let t1 = segment.times()[i + 1];
    let h = t1 - t0;
    let s = (t - t0) / h;
    let s2 = s * s;
    let s3 = s2 * s;

    // Cubic Hermite basis.
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    let y0 = segment.state_at(i);
    let y1 = segment.state_at(i + 1);
    let (Some(yp0), Some(yp1)) = (segment.derivative_at(i), segment.derivative_at(i + 1)) else {
        return Err(Error::DerivativesUnavailable);
    };

    for k in 0..out.len() {
        out[k] = h00 * y0[k] + h * h10 * yp0[k] + h01 * y1[k] + h * h11 * yp1[k];
    }

    Ok(())
}
