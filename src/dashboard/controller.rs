use axum::{
    extract::State,
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::dashboard::command::get_totals_cmd::{GetTotalsCommand, GetTotalsCommandRequest};
use crate::dashboard::dto::TotalsDto;
use crate::dashboard::factory;

pub(crate) async fn get_totals(
    State(state): State<AppState>) -> Result<Json<TotalsDto>, ServerError> {
    let svc = factory::create_dashboard_service(&state.client);
    let res = GetTotalsCommand::new(svc).execute(GetTotalsCommandRequest::default()).await?;
    Ok(Json(res.totals))
}
