//! Contains the memory mapped I/O region types: the peripheral callbacks, the [IoRegion]
//! descriptor, and the ordered [RegionMap] used to route accesses.

mod callbacks;
pub use callbacks::{IoCallbacks, IoDevice};

mod region;
pub use region::IoRegion;

mod map;
pub use map::RegionMap;
