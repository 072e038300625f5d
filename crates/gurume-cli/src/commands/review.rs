use clap::Args;

use crate::client::{ApiClient, ReviewInput};

#[derive(Debug, Args)]
pub(crate) struct ReviewArgs {
    /// Upstream shop identifier
    pub shop_id: String,
    /// Reviewing employee's id
    #[arg(long)]
    pub employee: String,
    #[arg(long)]
    pub comment: Option<String>,
    /// 1 (calm) to 4 (lively)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=4))]
    pub atmosphere: Option<i64>,
    /// 1 (special occasion) to 4 (everyday)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=4))]
    pub usecase: Option<i64>,
}

/// Posts a review and prints the stored id.
///
/// # Errors
///
/// Returns an error if the server rejects the review or is unreachable.
pub(crate) async fn run_review(client: &ApiClient, args: ReviewArgs) -> anyhow::Result<()> {
    let input = ReviewInput {
        employee_id: &args.employee,
        comment: args.comment.as_deref(),
        atmosphere: args.atmosphere,
        usecase: args.usecase,
    };
    let review = client.create_review(&args.shop_id, &input).await?;
    println!("recorded review {} for {}", review.id, args.shop_id);
    Ok(())
}
