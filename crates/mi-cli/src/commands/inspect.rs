//! `mitest inspect`: post fixture instances and report what was recorded.

use std::path::Path;

use anyhow::{bail, Context as _};
use mi_sdk::MiResult;
use mi_testkit::{check_instance_property_names, Fixture, TestableContext};

use crate::output::{StyledOutput, Verdict};

pub fn execute(
    out: &mut StyledOutput,
    fixture_path: &Path,
    class: Option<&str>,
    expect: &[String],
) -> anyhow::Result<()> {
    let fixture = Fixture::from_file(fixture_path)
        .with_context(|| format!("loading {}", fixture_path.display()))?;

    let ctx = TestableContext::new();
    for inst in fixture.instances() {
        if class.is_some_and(|c| c != inst.class().name()) {
            continue;
        }
        ctx.context().post_instance(inst);
    }
    ctx.context().post_result(MiResult::Ok);
    log::info!(
        "{}: {} of {} instances posted",
        fixture_path.display(),
        ctx.instance_count(),
        fixture.instances().len()
    );

    out.plain(&ctx.to_string());

    if expect.is_empty() {
        out.flush();
        return Ok(());
    }

    out.heading("Property names");
    let mut failures = 0;
    for (index, inst) in ctx.instances().iter().enumerate() {
        let label = format!("#{} {}", index, inst.class_name());
        match check_instance_property_names(inst, expect) {
            Ok(()) => out.verdict(Verdict::Pass, &label),
            Err(mismatch) => {
                failures += 1;
                out.verdict(Verdict::Fail, &format!("{}: {}", label, mismatch));
            }
        }
    }
    out.flush();

    if failures > 0 {
        bail!(
            "{} of {} instances do not match the expected property names",
            failures,
            ctx.instance_count()
        );
    }
    Ok(())
}
