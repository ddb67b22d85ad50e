use tracing::info;

use crate::error::AppResult;
use crate::run::execute_run;
use crate::sinks::export_run;
use crate::store::ResultStore;
use crate::transport::ApplianceClient;

use super::types::RunPlan;

pub(in crate::entry) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let store = ResultStore::new(&plan.output);
    for index in 1..=plan.runs {
        info!(
            "Run {}/{}: {} endpoints x {} iterations against {}",
            index,
            plan.runs,
            plan.settings.endpoints.len(),
            plan.settings.plan.iterations,
            plan.client.host
        );
        let transport = ApplianceClient::new(plan.client.clone())?;
        let record = execute_run(transport, &plan.settings, &store).await?;
        if let Some(export) = plan.export.as_ref() {
            export_run(export, &record).await?;
        }
    }
    Ok(())
}
