use crate::{
    error::AppResult,
    models::Recommendation,
    services::{providers::PosterProvider, recommender::Recommender},
};

/// Recommends movies similar to `title`
///
/// Resolves the title, ranks its similarity row and looks up a poster for
/// each result, one at a time. Resolution failures surface before any poster
/// request is made; poster lookups themselves never fail.
pub async fn recommend(
    recommender: &Recommender,
    posters: &dyn PosterProvider,
    title: &str,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    let similar = recommender.similar_to(title, k)?;

    let mut recommendations = Vec::with_capacity(similar.len());
    for (index, score) in similar {
        let movie = recommender.movie(index)?;
        let poster_url = posters.fetch_poster_url(movie.movie_id).await;

        recommendations.push(Recommendation {
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            poster_url,
            score,
        });
    }

    tracing::info!(
        title = %title,
        results = recommendations.len(),
        provider = posters.name(),
        "Recommendations generated"
    );

    Ok(recommendations)
}
