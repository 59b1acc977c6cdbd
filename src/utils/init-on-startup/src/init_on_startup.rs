// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use dill::{Builder, BuilderExt, Catalog, TypecastBuilder};
use internal_error::{InternalError, ResultIntoInternal};
use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type JobName = &'static str;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Component that has to do some work before the application starts
/// serving requests
#[async_trait::async_trait]
pub trait InitOnStartup: Send + Sync {
    /// Must be idempotent: every process start runs it again
    async fn run_initialization(&self) -> Result<(), InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Registered via `#[dill::meta(...)]` next to `#[dill::interface(dyn
/// InitOnStartup)]`
#[derive(Debug, Clone)]
pub struct InitOnStartupMeta {
    pub job_name: JobName,
    pub depends_on: &'static [JobName],
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum StartupJobsError {
    #[error(transparent)]
    JobNameNonUnique(StartupJobsNonUniqueNameError),

    #[error(transparent)]
    DependsOnUnresolved(StartupJobsDependsOnUnresolvedError),

    #[error(transparent)]
    DependsOnLoop(StartupJobsDependsOnLoopError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Startup job name '{job_name}' is not unique")]
pub struct StartupJobsNonUniqueNameError {
    pub job_name: JobName,
}

#[derive(Error, Debug)]
#[error("Startup job '{job_name}' depends on unknown job '{unresolved_depends_on}'")]
pub struct StartupJobsDependsOnUnresolvedError {
    pub job_name: JobName,
    pub unresolved_depends_on: JobName,
}

#[derive(Error, Debug)]
#[error("Startup job '{job_name}' is part of a dependency loop")]
pub struct StartupJobsDependsOnLoopError {
    pub job_name: JobName,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Runs every [`InitOnStartup`] component registered in the catalog, each
/// after the jobs it depends on. Returns the names of the executed jobs in
/// execution order.
#[tracing::instrument(level = "debug", skip_all)]
pub async fn run_startup_jobs(catalog: &Catalog) -> Result<Vec<JobName>, StartupJobsError> {
    let jobs = collect_startup_jobs(catalog)?;
    tracing::debug!(jobs_count = jobs.len(), "Collected startup jobs");

    let execution_order = jobs_execution_order(&jobs)?;
    tracing::debug!(?execution_order, "Resolved startup jobs order");

    for job_name in &execution_order {
        let Some(job) = jobs.get(job_name) else {
            continue;
        };

        let instance = job.builder.get(catalog).int_err()?;

        tracing::info!(job_name, "Running startup job");
        instance.run_initialization().await?;
    }

    Ok(execution_order)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct StartupJob<'a> {
    builder: TypecastBuilder<'a, dyn InitOnStartup + 'static>,
    meta: InitOnStartupMeta,
}

fn collect_startup_jobs(
    catalog: &Catalog,
) -> Result<HashMap<JobName, StartupJob<'_>>, StartupJobsError> {
    let mut jobs = HashMap::new();

    for builder in catalog.builders_for::<dyn InitOnStartup>() {
        let all_meta: Vec<&InitOnStartupMeta> = builder.metadata_get_all();
        let [meta] = all_meta.as_slice() else {
            return Err(InternalError::new(format!(
                "Startup job {} must declare exactly one InitOnStartupMeta",
                builder.instance_type_name()
            ))
            .into());
        };
        let meta = (*meta).clone();

        let job_name = meta.job_name;
        if jobs.insert(job_name, StartupJob { builder, meta }).is_some() {
            return Err(StartupJobsError::JobNameNonUnique(
                StartupJobsNonUniqueNameError { job_name },
            ));
        }
    }

    for job in jobs.values() {
        if let Some(unresolved) = job
            .meta
            .depends_on
            .iter()
            .find(|depends_on| !jobs.contains_key(*depends_on))
        {
            return Err(StartupJobsError::DependsOnUnresolved(
                StartupJobsDependsOnUnresolvedError {
                    job_name: job.meta.job_name,
                    unresolved_depends_on: *unresolved,
                },
            ));
        }
    }

    Ok(jobs)
}

fn jobs_execution_order(
    jobs: &HashMap<JobName, StartupJob<'_>>,
) -> Result<Vec<JobName>, StartupJobsError> {
    let mut graph: StableDiGraph<JobName, ()> = StableDiGraph::new();

    // Sorted for a stable order among independent jobs
    let mut job_names: Vec<_> = jobs.keys().copied().collect();
    job_names.sort_unstable();

    let node_by_name: HashMap<JobName, NodeIndex> = job_names
        .iter()
        .map(|job_name| (*job_name, graph.add_node(*job_name)))
        .collect();

    for (job_name, job) in jobs {
        for depends_on in job.meta.depends_on {
            graph.add_edge(node_by_name[depends_on], node_by_name[job_name], ());
        }
    }

    toposort(&graph, None)
        .map(|order| order.into_iter().map(|node| graph[node]).collect())
        .map_err(|cycle| {
            StartupJobsError::DependsOnLoop(StartupJobsDependsOnLoopError {
                job_name: graph[cycle.node_id()],
            })
        })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
