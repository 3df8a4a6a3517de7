use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// `selected_date` as posted by the date form or passed in the export link.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DateSelection {
    #[schema(example = "2024-01-01", format = "date")]
    #[param(example = "2024-01-01")]
    pub selected_date: Option<String>,
}
