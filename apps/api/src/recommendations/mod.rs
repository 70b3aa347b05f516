// College recommendations: preference-weighted ranking, the government-institution
// allow-list applied to every college-producing flow, and the profile endpoints
// for preferences and the saved-college shortlist.

pub mod domain_filter;
pub mod fit_scoring;
pub mod handlers;
