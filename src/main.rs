use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use scp_import::core::{JobPoller, report, request, share_types};
use scp_import::logging::{self, LogConfig};
use scp_import::redfish::{
    CertificateWarning, Credentials, HostPowerState, ImportRequest, ShareParameters, ShareType,
    ShutdownType, Target,
};
use scp_import::{config, context::AppContext};
use serde::Serialize;

const EXAMPLES: &str = "\
Examples:
  Import a profile from an NFS share and apply every component:
    scp-import --ip 192.168.0.120 -u root -p calvin -t ALL --share-ip 192.168.0.130 \\
      --share-type NFS --share-name /nfs --filename SCP_export_R740

  Apply only BIOS settings from a CIFS share, forcing a reboot:
    scp-import --ip 192.168.0.120 -u root -p calvin -t BIOS --share-ip 192.168.0.140 \\
      --share-type CIFS --share-name cifs_share_vm --filename R740_scp_file -s Forced \\
      --username administrator --password password

  List the share types supported by this iDRAC firmware:
    scp-import --ip 192.168.0.120 -u root -p calvin --get-share-types";

#[derive(Parser)]
#[command(name = "scp-import")]
#[command(
    about = "Import a Server Configuration Profile from a network share through the iDRAC Redfish API",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// iDRAC address
    #[arg(long = "ip")]
    idrac_ip: String,

    /// iDRAC username
    #[arg(short = 'u', long)]
    idrac_username: String,

    /// iDRAC password
    #[arg(short = 'p', long, env = "IDRAC_PASSWORD", hide_env_values = true)]
    idrac_password: String,

    /// Only print the share types supported by the iDRAC firmware
    #[arg(long)]
    get_share_types: bool,

    /// Configuration file (defaults to /etc/scp-import/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    import: ImportArgs,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(Args)]
struct ImportArgs {
    /// Component attributes to import
    #[arg(short = 't', long, ignore_case = true, required_unless_present = "get_share_types")]
    target: Option<Target>,

    /// Address of the network share
    #[arg(long, required_unless_present = "get_share_types")]
    share_ip: Option<String>,

    /// Network share protocol
    #[arg(long, ignore_case = true, required_unless_present = "get_share_types")]
    share_type: Option<ShareType>,

    /// Share name (NFS export path, CIFS share, or HTTP directory)
    #[arg(long, required_unless_present = "get_share_types")]
    share_name: Option<String>,

    /// Name of the profile file on the share
    #[arg(long, required_unless_present = "get_share_types")]
    filename: Option<String>,

    /// Share username (CIFS, HTTP, HTTPS)
    #[arg(long)]
    username: Option<String>,

    /// Share password
    #[arg(long)]
    password: Option<String>,

    /// CIFS workgroup
    #[arg(long)]
    workgroup: Option<String>,

    /// Certificate warning handling for HTTPS shares. The iDRAC default is Enabled
    #[arg(long, ignore_case = true)]
    ignore_cert_warning: Option<CertificateWarning>,

    /// Host shutdown used to apply changes. The iDRAC default is Graceful;
    /// NoReboot stages changes until the next manual reboot
    #[arg(short = 's', long, ignore_case = true)]
    shutdown_type: Option<ShutdownType>,

    /// Host power state after the import. The iDRAC default is On
    #[arg(short = 'e', long, ignore_case = true)]
    end_power_state: Option<HostPowerState>,
}

impl ImportArgs {
    fn into_request(self) -> Result<ImportRequest> {
        let target = self.target.context("--target is required")?;

        let mut share = ShareParameters::new(target);
        share.ip_address = self.share_ip;
        share.share_type = self.share_type;
        share.share_name = self.share_name;
        share.file_name = self.filename;
        share.user_name = self.username;
        share.password = self.password;
        share.workgroup = self.workgroup;
        share.ignore_certificate_warning = self.ignore_cert_warning;

        let mut request = ImportRequest::new(share);
        request.shutdown_type = self.shutdown_type;
        request.host_power_state = self.end_power_state;
        Ok(request)
    }
}

#[derive(Args, Serialize)]
struct SettingsArgs {
    /// Seconds between job status queries
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    poll_interval_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    verbose: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    json_logs: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = config::AppConfig::new(cli.config.as_deref(), Some(&cli.settings))?;
    logging::init(LogConfig {
        json: config.json_logs,
        verbose: config.verbose,
    });

    let credentials = Credentials {
        username: cli.idrac_username,
        password: cli.idrac_password,
    };
    let ctx = AppContext::new(config, &cli.idrac_ip, credentials)?;

    if cli.get_share_types {
        run_share_types(&ctx)
            .await
            .context("Failed to query supported share types")?;
        return Ok(ExitCode::SUCCESS);
    }

    let request = cli.import.into_request()?;
    run_import(&ctx, request)
        .await
        .context("Failed to import server configuration profile")
}

async fn run_share_types(ctx: &AppContext) -> Result<()> {
    let share_types = share_types::fetch(&ctx.client).await?;
    report::write_share_types(&mut io::stdout(), &ctx.controller, &share_types)?;
    Ok(())
}

async fn run_import(ctx: &AppContext, request: ImportRequest) -> Result<ExitCode> {
    let mut stdout = io::stdout();

    let job = request::submit(&ctx.client, &request, &mut stdout).await?;

    let poller = JobPoller::new(ctx.client.clone(), ctx.config.poll_interval());
    let outcome = poller.run(job, &mut stdout).await?;

    report::write_outcome(&mut stdout, &outcome)?;
    stdout.flush()?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
