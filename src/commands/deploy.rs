/*!
 * spare deploy - upload the deploy target into the bucket
 */

use std::sync::Arc;
use std::time::Instant;

use super::CommonOptions;
use crate::cli_style::{format_duration, print_success, section_header, Icons, Theme};
use crate::config::Config;
use crate::deploy::{DeployReport, PermitGate, UploadPipeline};
use crate::error::Result;
use crate::protocol::{AwsSettings, S3Client};

#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub common: CommonOptions,
    /// Upload permits; 0 uses the number of available cores
    pub concurrency: usize,
}

pub fn run_deploy(options: &DeployOptions) -> Result<DeployReport> {
    let (config, settings) = options.common.load()?;
    let started = Instant::now();
    println!("{}", section_header("Deploying"));

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(deploy(&config, settings, options.concurrency))?;

    print_success(&format!(
        "{} Deployed {} files to {} in {}",
        Icons::ROCKET,
        Theme::value(report.len()),
        Theme::value(&config.s3_bucket_name),
        format_duration(started.elapsed().as_secs_f64())
    ));
    Ok(report)
}

/// Upload every file under the configured deploy target
pub async fn deploy(
    config: &Config,
    settings: AwsSettings,
    concurrency: usize,
) -> Result<DeployReport> {
    let client = Arc::new(S3Client::new(settings).await?);
    let pipeline = UploadPipeline::new(client, PermitGate::new(concurrency));
    Ok(pipeline
        .deploy(&config.s3_bucket_name, config.deploy_target.as_path())
        .await?)
}
