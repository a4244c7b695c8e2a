pub mod providers;
pub mod recommendations;
pub mod recommender;
pub mod similarity;
pub mod stopwords;
pub mod title_resolver;
pub mod vectorizer;

pub use recommender::Recommender;
