pub mod dataset;

pub use dataset::JsonMovieSource;
pub use dataset::MovieSource;
