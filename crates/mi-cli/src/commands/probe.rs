//! `mitest probe`: show what the environment probes report on this host.

use std::path::Path;

use anyhow::Context as _;
use mi_testkit::probe::{self, ShellRunner};
use mi_testkit::HarnessConfig;

use crate::output::{StyledOutput, Verdict};

pub fn execute(out: &mut StyledOutput, config_path: Option<&Path>, fqdn: bool) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => HarnessConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => HarnessConfig::load()?,
    };

    out.heading("Host");
    out.field("Host name", &probe::local_host_name()?);
    out.field("System", &probe::sysname()?);
    out.field("Distribution", &probe::distribution_name());
    match probe::effective_uid() {
        Some(uid) => out.field("Effective uid", &uid.to_string()),
        None => out.field("Effective uid", "n/a"),
    }

    if probe::prerequisites_met("privileged", probe::effective_uid(), &config.probe) {
        out.verdict(Verdict::Pass, "privileged tests can run");
    } else {
        out.verdict(Verdict::Skip, "privileged tests will be skipped");
    }

    if fqdn {
        match probe::resolve_fq_host_name(&ShellRunner, &config.probe) {
            Ok(name) => out.field("FQDN", &name),
            Err(e) => {
                out.verdict(Verdict::Fail, &format!("FQDN lookup: {}", e));
                out.flush();
                return Err(e.into());
            }
        }
    }
    out.flush();
    Ok(())
}
