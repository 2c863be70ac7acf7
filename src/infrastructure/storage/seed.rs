//! Sample data for local development

use crate::domain::log::{LogRepository, NewLogRecord};
use crate::domain::workflow::{NewWorkflow, WorkflowRepository};
use crate::domain::DomainError;

/// Insert sample workflows and logs when the store is empty. A store that
/// already has workflows is left untouched.
pub async fn insert_sample_data(
    workflows: &dyn WorkflowRepository,
    logs: &dyn LogRepository,
) -> Result<usize, DomainError> {
    if !workflows.list(0, 1).await?.is_empty() {
        tracing::info!("Workflows already present, skipping sample data");
        return Ok(0);
    }

    let samples: [(&str, &str, [(&str, &str); 3]); 3] = [
        (
            "Customer Data Migration",
            "Migration of customer data from legacy system to new platform",
            [
                ("Error", "Missing email addresses for 15 customers"),
                ("Warning", "Duplicate customer IDs found"),
                ("Info", "Address format inconsistent across records"),
            ],
        ),
        (
            "Product Catalog Transformation",
            "Transformation of product catalog data to new format",
            [
                ("Error", "Invalid price format for 8 products"),
                ("Warning", "Missing category information for 12 products"),
                ("Info", "Product names contain special characters"),
            ],
        ),
        (
            "Sales Data Integration",
            "Integration of sales data from multiple sources",
            [
                ("Error", "Date format inconsistent across regions"),
                ("Warning", "Missing sales representative information"),
                ("Info", "Currency conversion required for international sales"),
            ],
        ),
    ];

    let mut inserted = 0;
    for (name, description, sample_logs) in samples {
        let workflow = workflows
            .create(NewWorkflow::new(name)?.with_description(description))
            .await?;
        inserted += 1;

        for (log_type, message) in sample_logs {
            logs.append(NewLogRecord::new(workflow.id, log_type, message))
                .await?;
        }
    }

    tracing::info!(workflows = inserted, "Sample data inserted");
    Ok(inserted)
}
