use std::error::Error;
use std::fmt;

/// An error type indicating that network data
/// can't be turned back into a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkDataError {
    /// The flat weight list doesn't match the layer sizes.
    WeightCountMismatch { expected: usize, found: usize },
    /// The layer sizes require more weights than can be counted.
    LayerSizeOverflow,
}

impl fmt::Display for NetworkDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightCountMismatch { expected, found } => write!(
                f,
                "network data holds {} weights, but its layers require {}",
                found, expected
            ),
            Self::LayerSizeOverflow => {
                write!(f, "network data layer sizes overflow the weight count")
            }
        }
    }
}

impl Error for NetworkDataError {}
