//! Spot read of a single payload element.

use cmor_model::{Result, ValidationError};
use rand::Rng;
use tracing::debug;

use crate::source::TemporalDataSource;

/// Reads one randomly chosen element of the payload variable.
///
/// A masked value, a fill value, or a corrupt chunk surfaces here as an
/// `UnreadableDataPoint` without scanning the whole file. Zero-length
/// dimensions index at 0 so the read itself reports the failure.
pub fn check_data_point<R: Rng + ?Sized>(
    source: &dyn TemporalDataSource,
    filename: &str,
    rng: &mut R,
) -> Result<f64> {
    let index: Vec<usize> = source
        .shape()
        .iter()
        .map(|&extent| if extent == 0 { 0 } else { rng.gen_range(0..extent) })
        .collect();

    match source.read_element(&index) {
        Ok(value) => {
            debug!(filename, ?index, value, "sampled data point");
            Ok(value)
        }
        Err(err) => {
            debug!(filename, ?index, %err, "data point read failed");
            Err(ValidationError::UnreadableDataPoint {
                filename: filename.to_string(),
                index,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn reads_a_point_within_the_shape() {
        let source = MemorySource::new("tas").with_data(vec![2, 3], vec![1.0; 6]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            assert_eq!(check_data_point(&source, "tas.nc", &mut rng).unwrap(), 1.0);
        }
    }

    #[test]
    fn masked_point_is_unreadable() {
        let source = MemorySource::new("tas")
            .with_data(vec![1], vec![1.0e20])
            .with_fill_value(1.0e20);
        let mut rng = StdRng::seed_from_u64(7);
        let error = check_data_point(&source, "tas.nc", &mut rng).unwrap_err();
        assert!(matches!(
            error,
            ValidationError::UnreadableDataPoint { ref index, .. } if index == &[0]
        ));
    }

    #[test]
    fn empty_dimension_is_unreadable() {
        let source = MemorySource::new("tas").with_data(vec![0, 3], vec![]);
        let mut rng = StdRng::seed_from_u64(7);
        let error = check_data_point(&source, "tas.nc", &mut rng).unwrap_err();
        assert!(matches!(error, ValidationError::UnreadableDataPoint { .. }));
    }
}
