//! Analysis pipeline
//!
//! Runs discover, scan, close and order for every module of a project.
//! Modules are independent, so they may be analysed concurrently; within a
//! module, closure only starts once every package has been scanned.

use crate::core::closure::close_module;
use crate::core::discovery::{DiscoveryOptions, Discoverer};
use crate::core::ordering::order_module;
use crate::core::parallel::{build_thread_pool, CancellationToken, ProgressUpdate};
use crate::core::scanner::scan_module;
use crate::error::{DsmError, Result};
use crate::models::{ModuleNode, ProjectNode, Settings};
use crate::parsers::{create_descriptor, BuildDescriptor};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Project analyzer
pub struct Analyzer {
    settings: Settings,
    cancel: CancellationToken,
}

impl Analyzer {
    /// Create a new analyzer with the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cancel: CancellationToken::new(),
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Analyze the configured project
    pub fn analyze(&self) -> Result<ProjectNode> {
        self.analyze_with_progress(|_| {})
    }

    /// Analyze the configured project, reporting scan progress
    pub fn analyze_with_progress<P>(&self, progress: P) -> Result<ProjectNode>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let descriptor = create_descriptor(&self.settings);
        self.analyze_with_descriptor(descriptor.as_ref(), progress)
    }

    /// Analyze with an explicit source of module names
    pub fn analyze_with_descriptor<P>(&self, descriptor: &dyn BuildDescriptor, progress: P) -> Result<ProjectNode>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let root = &self.settings.project_root;
        if !root.is_dir() {
            return Err(DsmError::InvalidPath { path: root.clone() });
        }

        if self.settings.parallel {
            let pool = build_thread_pool(self.settings.effective_threads())?;
            pool.install(|| self.run(descriptor, &progress))
        } else {
            self.run(descriptor, &progress)
        }
    }

    fn run<P>(&self, descriptor: &dyn BuildDescriptor, progress: &P) -> Result<ProjectNode>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let start_time = Instant::now();
        let parallel = self.settings.parallel;

        let discoverer = Discoverer::new(DiscoveryOptions::from_settings(&self.settings)?, self.cancel.clone());
        let mut project = discoverer.discover_project(&self.settings.project_root, descriptor, parallel)?;
        tracing::debug!(
            "discovered {} module(s) with {} package(s) in {:?}",
            project.modules.len(),
            project.package_count(),
            start_time.elapsed()
        );

        let completed = AtomicUsize::new(0);
        let analyze_one = |module: &mut ModuleNode| -> Result<()> {
            analyze_module(module, parallel, &self.cancel, progress)?;
            completed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };

        let outcome = if parallel {
            project.modules.par_iter_mut().try_for_each(analyze_one)
        } else {
            project.modules.iter_mut().try_for_each(analyze_one)
        };

        match outcome {
            Err(DsmError::Cancelled { .. }) => {
                let completed_modules = completed.load(Ordering::SeqCst);
                tracing::warn!("analysis cancelled after {} module(s)", completed_modules);
                return Err(DsmError::Cancelled { completed_modules });
            }
            other => other?,
        }

        let circular: usize = project
            .all_modules()
            .iter()
            .map(|module| module.circular_packages().count())
            .sum();
        tracing::info!(
            "analyzed {} module(s), {} package(s), {} circular, in {:?}",
            project.all_modules().len(),
            project.package_count(),
            circular,
            start_time.elapsed()
        );

        Ok(project)
    }
}

/// Scan, close and order one discovered module and all of its sub-modules
pub fn analyze_module<P>(
    module: &mut ModuleNode,
    parallel: bool,
    cancel: &CancellationToken,
    progress: &P,
) -> Result<()>
where
    P: Fn(ProgressUpdate) + Send + Sync,
{
    cancel.check()?;

    for sub_module in &mut module.sub_modules {
        analyze_module(sub_module, parallel, cancel, progress)?;
    }

    tracing::debug!("scanning module {} ({} packages)", module.name, module.packages.len());
    scan_module(module, parallel, cancel, progress)?;
    close_module(module)?;
    order_module(module)?;
    Ok(())
}
