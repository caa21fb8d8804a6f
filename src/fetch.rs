//! Parallel per-country ratings retrieval.

use crate::api::RatingsApi;
use crate::models::CountryComparison;
use std::thread;

/// Fetch ratings for every country concurrently and wait for all of them.
///
/// One worker per country. Results come back in the order of `countries`. A
/// failed request (or a worker that panicked) is logged and downgraded to an
/// empty result for that country, so this never fails as a whole.
pub fn fetch_comparison<A>(api: &A, countries: &[String]) -> Vec<CountryComparison>
where
    A: RatingsApi + Sync + ?Sized,
{
    thread::scope(|s| {
        let workers: Vec<_> = countries
            .iter()
            .map(|country| (country, s.spawn(move || api.ratings(country))))
            .collect();

        workers
            .into_iter()
            .map(|(country, worker)| match worker.join() {
                Ok(Ok(ratings)) => CountryComparison {
                    country: country.clone(),
                    ratings,
                },
                Ok(Err(e)) => {
                    log::warn!("Error fetching data for {country}: {e:#}");
                    CountryComparison::empty(country.clone())
                }
                Err(_) => {
                    log::warn!("Error fetching data for {country}: worker panicked");
                    CountryComparison::empty(country.clone())
                }
            })
            .collect()
    })
}
