//! Subcommand handlers

use crate::render;
use crate::settings::{load_config, load_store};
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use nexus_graph::{
    Bounds, Dashboard, DetailView, Filter, FilterSet, LayoutLink, LayoutNode, NodeRef,
    ViewTransform,
};
use nexus_model::{ProjectId, TaskStatus, WorkerId};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Dispatch parsed arguments, writing results to `out`
///
/// # Errors
/// Fails on unreadable input files, invalid configuration, unknown entity
/// ids or write errors
pub fn run(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let config = load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let store = load_store(matches.get_one::<PathBuf>("data").map(PathBuf::as_path))?;
    let mut dashboard = Dashboard::new(store, config).context("invalid configuration")?;

    match matches.subcommand() {
        Some(("tree", args)) => {
            dashboard.set_filters(filters(args));
            tree(&dashboard, args.get_flag("json"), out)
        }
        Some(("layout", args)) => {
            dashboard.set_filters(filters(args));
            let height = args.get_one::<f64>("height").copied().unwrap_or(800.0);
            layout(&dashboard, height, out)
        }
        Some(("inspect", args)) => inspect(&dashboard, args, out),
        Some(("stats", args)) => {
            let stats = dashboard.stats();
            if args.get_flag("json") {
                write_json(&stats, out)
            } else {
                render::write_stats(&stats, out).map_err(Into::into)
            }
        }
        Some(("export", args)) => export(&dashboard, args.get_one::<PathBuf>("out"), out),
        Some(("members", args)) => {
            let members = dashboard.member_options();
            if args.get_flag("json") {
                write_json(&members, out)
            } else {
                render::write_members(&members, out).map_err(Into::into)
            }
        }
        Some((other, _)) => bail!("unknown command '{other}'"),
        None => bail!("no command given"),
    }
}

fn filters(args: &ArgMatches) -> FilterSet {
    FilterSet {
        project: args.get_one::<Filter<ProjectId>>("project").cloned().unwrap_or_default(),
        member: args.get_one::<Filter<WorkerId>>("member").cloned().unwrap_or_default(),
        status: args.get_one::<Filter<TaskStatus>>("status").cloned().unwrap_or_default(),
    }
}

fn tree(dashboard: &Dashboard, json: bool, out: &mut dyn Write) -> Result<()> {
    dashboard.with_view(|view| {
        if json {
            write_json(view.tree, out)
        } else {
            render::write_tree(view.tree, out).map_err(Into::into)
        }
    })
}

#[derive(Serialize)]
struct LayoutReport<'a, 'v> {
    nodes: &'a [LayoutNode<'v>],
    links: &'a [LayoutLink],
    bounds: Bounds,
    transform: ViewTransform,
}

fn layout(dashboard: &Dashboard, height: f64, out: &mut dyn Write) -> Result<()> {
    dashboard.with_view(|view| {
        let report = LayoutReport {
            nodes: &view.layout.nodes,
            links: &view.layout.links,
            bounds: view.layout.bounds(),
            transform: view.initial_transform(height),
        };
        write_json(&report, out)
    })
}

fn inspect(dashboard: &Dashboard, args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let kind = args.get_one::<String>("kind").map_or("root", String::as_str);
    let id = args.get_one::<String>("id").cloned().unwrap_or_default();
    let node = match kind {
        "root" => NodeRef::Root,
        "project" => NodeRef::Project(id.clone().into()),
        "team" => NodeRef::Team(id.clone().into()),
        "worker" => NodeRef::Worker(id.clone().into()),
        "task" => NodeRef::Task(id.clone().into()),
        other => bail!("unknown kind '{other}'"),
    };
    let json = args.get_flag("json");
    dashboard
        .with_detail(&node, |detail: &DetailView<'_>| {
            if json {
                write_json(detail, out)
            } else {
                render::write_detail(detail, out).map_err(Into::into)
            }
        })
        .with_context(|| format!("no {kind} with id '{id}'"))?
}

fn export(dashboard: &Dashboard, path: Option<&PathBuf>, out: &mut dyn Write) -> Result<()> {
    let json = dashboard.store().export_json()?;
    match path {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "state exported");
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(value: &T, out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
