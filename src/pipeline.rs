use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assets::decode::load_image;
use crate::effects::composite::composite;
use crate::encode::png::write_png;
use crate::foundation::error::{TabletopError, TabletopResult};
use crate::render::backend::{RenderBackend, RenderContext};
use crate::scene::geometry::Scene;
use crate::scene::model::SceneParams;
use crate::scene::sampler::ParamSampler;

/// Files written by one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessReport {
    /// Shader-lit, untextured render.
    pub shader_pass: PathBuf,
    /// Fixed-function-lit, textured render.
    pub textured_pass: PathBuf,
    /// Final composite.
    pub composite: PathBuf,
    /// Width of all three images.
    pub width: u32,
    /// Height of all three images.
    pub height: u32,
}

/// Render both passes, composite them, and write all three images.
///
/// The rendering context is acquired once and released before compositing, including on
/// failure.
#[tracing::instrument(
    skip_all,
    fields(subject = %params.subject.display(), iteration = params.iteration)
)]
pub fn process(
    params: &SceneParams,
    backend: &mut dyn RenderBackend,
) -> TabletopResult<ProcessReport> {
    params.validate()?;

    let background = load_image(&params.background)?;
    let subject = load_image(&params.subject)?;
    tracing::debug!(
        background = %format!("{}x{}", background.width, background.height),
        subject = %format!("{}x{}", subject.width, subject.height),
        "inputs decoded"
    );
    let scene = Scene::build(params, background, subject);

    let canvas = params.canvas();
    let mut ctx = RenderContext::acquire(backend, canvas)?;

    let started = Instant::now();
    let image1 = ctx.render_pass(&scene.shaded)?;
    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "shader pass rendered"
    );
    write_png(&params.shader_pass_path(), &image1)?;

    let started = Instant::now();
    let image2 = ctx.render_pass(&scene.textured)?;
    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "textured pass rendered"
    );
    write_png(&params.textured_pass_path(), &image2)?;

    ctx.release();

    let image3 = composite(&image1, &image2)?;
    write_png(&params.composite_path(), &image3)?;

    Ok(ProcessReport {
        shader_pass: params.shader_pass_path(),
        textured_pass: params.textured_pass_path(),
        composite: params.composite_path(),
        width: image3.width,
        height: image3.height,
    })
}

/// Many subjects, many randomized runs each.
#[derive(Clone, Debug)]
pub struct BatchPlan {
    /// Subject photos, processed in order.
    pub subjects: Vec<PathBuf>,
    /// Runs per subject.
    pub iterations: u32,
    /// Seed for rotation and lamp sampling.
    pub seed: u64,
    /// Parameters shared by every run; rotations and lamp offsets are resampled.
    pub base: SceneParams,
}

/// Output names for one batch run: `{stem}_{iteration}_{image1|image2|out}.png`.
pub fn batch_output_names(subject: &Path, iteration: u32) -> TabletopResult<[String; 3]> {
    let stem = subject
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            TabletopError::config(format!(
                "subject '{}' has no usable file stem",
                subject.display()
            ))
        })?;
    Ok([
        format!("{stem}_{iteration}_image1.png"),
        format!("{stem}_{iteration}_image2.png"),
        format!("{stem}_{iteration}_out.png"),
    ])
}

/// Run every `(subject, iteration)` pair sequentially, each with its own rendering context.
///
/// All output paths are resolved before the first render; two runs that would write the same
/// file are a configuration error.
#[tracing::instrument(
    skip_all,
    fields(subjects = plan.subjects.len(), iterations = plan.iterations, seed = plan.seed)
)]
pub fn run_batch(
    plan: &BatchPlan,
    backend: &mut dyn RenderBackend,
) -> TabletopResult<Vec<ProcessReport>> {
    if plan.subjects.is_empty() {
        return Err(TabletopError::config("batch needs at least one subject"));
    }
    if plan.iterations == 0 {
        return Err(TabletopError::config("batch iterations must be > 0"));
    }

    let mut jobs = Vec::with_capacity(plan.subjects.len() * plan.iterations as usize);
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    for subject in &plan.subjects {
        for iteration in 0..plan.iterations {
            let names = batch_output_names(subject, iteration)?;
            for name in &names {
                let path = plan.base.out_dir.join(name);
                if let Some(prev) = claimed.insert(path.clone(), subject.as_path()) {
                    return Err(TabletopError::config(format!(
                        "batch output '{}' would be written by both '{}' and '{}'",
                        path.display(),
                        prev.display(),
                        subject.display()
                    )));
                }
            }
            jobs.push((subject, iteration, names));
        }
    }

    let mut sampler = ParamSampler::new(plan.seed);
    let mut reports = Vec::with_capacity(jobs.len());
    for (subject, iteration, names) in jobs {
        let [shader_pass_name, textured_pass_name, composite_name] = names;
        let params = SceneParams {
            iteration,
            subject: subject.clone(),
            shader_pass_name,
            textured_pass_name,
            composite_name,
            ..sampler.sample(&plan.base)
        };
        tracing::info!(
            rotate_x = params.rotate_x_deg,
            rotate_y = params.rotate_y_deg,
            rotate_z = params.rotate_z_deg,
            lamp_x = params.lamp_x,
            lamp_y = params.lamp_y,
            "batch run"
        );
        reports.push(process(&params, backend)?);
    }
    Ok(reports)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
