/*!
 * spare build - provision the bucket and its distribution
 */

use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::info;

use super::CommonOptions;
use crate::cli_style::{print_info, print_success, section_header, settings_box, Icons, Theme};
use crate::config::Config;
use crate::error::{Result, SpareError};
use crate::protocol::{AwsSettings, CloudFrontClient, S3Client};
use crate::provision::{BucketState, ProvisionReport, StorageProvisioner};

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub common: CommonOptions,
    /// Provision the bucket only
    pub skip_cdn: bool,
    /// Do not ask for confirmation
    pub yes: bool,
}

/// Validate, confirm, then provision
pub fn run_build(options: &BuildOptions) -> Result<ProvisionReport> {
    let (config, settings) = options.common.load()?;

    println!("{}", build_summary(&config, &settings, options));
    if !options.yes && !confirm()? {
        return Err(SpareError::Cancelled);
    }
    println!("{}", section_header("Provisioning"));

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(provision(&config, settings, options.skip_cdn))?;
    print_report(&config, &report);
    Ok(report)
}

/// Build the AWS clients and run every provisioning stage
pub async fn provision(
    config: &Config,
    settings: AwsSettings,
    skip_cdn: bool,
) -> Result<ProvisionReport> {
    let storage = S3Client::new(settings.clone()).await?;
    let cdn = if skip_cdn {
        info!("Skipping CDN distribution");
        None
    } else {
        Some(CloudFrontClient::new(settings).await?)
    };

    let provisioner = StorageProvisioner::new(storage, cdn);
    Ok(provisioner
        .provision(&config.s3_bucket_name, &config.region)
        .await?)
}

fn build_summary(config: &Config, settings: &AwsSettings, options: &BuildOptions) -> String {
    let endpoint = settings
        .endpoint
        .as_ref()
        .map_or_else(|| "AWS".to_string(), ToString::to_string);
    let custom_domain = if config.custom_domain.is_empty() {
        "-".to_string()
    } else {
        config.custom_domain.to_string()
    };

    settings_box(
        "Build",
        &[
            ("Debug mode", options.common.debug.to_string()),
            ("Profile", settings.profile.to_string()),
            ("Endpoint", endpoint),
            ("Bucket", config.s3_bucket_name.to_string()),
            ("Region", config.region.to_string()),
            ("Custom domain", custom_domain),
            ("CDN", (!options.skip_cdn).to_string()),
        ],
    )
}

fn confirm() -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Do you want to build with these settings?")
        .default(false)
        .interact()?)
}

fn print_report(config: &Config, report: &ProvisionReport) {
    match report.bucket_state {
        BucketState::Created => print_success(&format!(
            "Created bucket {}",
            Theme::value(&config.s3_bucket_name)
        )),
        BucketState::AlreadyOwned => print_info(&format!(
            "Bucket {} already exists and is owned by you",
            Theme::value(&config.s3_bucket_name)
        )),
    }
    if let Some(domain) = &report.cdn_domain {
        println!(
            "{} Distribution: {}",
            Icons::GLOBE,
            Theme::primary(format!("https://{}", domain))
        );
    }
}
