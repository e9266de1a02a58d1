//! Entity record commands.
//!
//! `plantlab get subculturing`, `plantlab add shifting --set ...`, etc.
//! All record operations run through the table controller so the CLI
//! gets the same validation, filtering, and delete flow as any other
//! front end.

use anyhow::Result;

use plantlab_client::{Api, ClientConfig, EntityClient, Operator, OperatorClient};
use plantlab_core::{date_part, Record, TableController};

use super::registry;

fn api(config_path: &std::path::Path) -> Result<Api> {
    let config = ClientConfig::load(config_path)?;
    let ctx = config.require_current()?;
    Ok(Api::from_context(ctx)?)
}

/// Load a controller for a table-backed entity.
fn controller(
    entity: &str,
    config_path: &std::path::Path,
) -> Result<TableController<EntityClient>> {
    let def = registry::find(entity).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown entity \"{}\". Known entities: {}.",
            entity,
            registry::names().join(", ")
        )
    })?;
    let store = EntityClient::new(api(config_path)?, def.path);
    let mut controller = TableController::new(def, store);
    controller.load()?;
    Ok(controller)
}

/// Parse repeated `KEY=VALUE` assignments.
fn parse_assignments(set: &[String]) -> Result<Vec<(String, String)>> {
    set.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => Ok((key.to_string(), value.to_string())),
            None => Err(anyhow::anyhow!("Invalid --set \"{}\" (expected KEY=VALUE).", pair)),
        })
        .collect()
}

fn render_table(columns: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:width$}", c.to_uppercase(), width = *w))
        .collect();
    println!("{}", header.join("  "));
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:width$}", cell, width = *w))
            .collect();
        println!("{}", line.join("  "));
    }
}

fn record_row(record: &Record, data_keys: &[&str]) -> Vec<String> {
    let mut row = vec![record.id().map(|id| id.to_string()).unwrap_or_default()];
    for key in data_keys {
        let cell = record.get_str(key).unwrap_or_default();
        // Table cells show only the date part of timestamp columns.
        let cell = if key.contains("date") {
            date_part(&cell).to_string()
        } else {
            cell
        };
        row.push(cell);
    }
    row
}

/// List records, optionally through the two-field filter.
pub fn get(
    entity: &str,
    field1: Option<&str>,
    field2: Option<&str>,
    output_json: bool,
    config_path: &std::path::Path,
) -> Result<()> {
    if entity == "operators" {
        return get_operators(output_json, config_path);
    }

    let mut controller = controller(entity, config_path)?;

    let rows: Vec<Record> = if field1.is_some() || field2.is_some() {
        controller.set_filter1(field1.unwrap_or(""));
        controller.set_filter2(field2.unwrap_or(""));
        controller.apply_filter();
        controller.visible().into_iter().cloned().collect()
    } else {
        controller.records().to_vec()
    };

    if output_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let def = controller.def();
    let mut columns = vec!["id"];
    columns.extend_from_slice(def.columns);
    let cells: Vec<Vec<String>> = rows.iter().map(|r| record_row(r, def.data_keys)).collect();
    render_table(&columns, &cells);
    println!("({} rows)", cells.len());
    Ok(())
}

fn get_operators(output_json: bool, config_path: &std::path::Path) -> Result<()> {
    let client = OperatorClient::new(api(config_path)?);
    let operators: Vec<Operator> = client.list()?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&operators)?);
        return Ok(());
    }

    let columns = ["id", "Name", "Role", "Sections", "Active"];
    let rows: Vec<Vec<String>> = operators
        .iter()
        .map(|op| {
            vec![
                op.id.to_string(),
                op.display_name(),
                op.role.clone().unwrap_or_default(),
                op.section_list().join(", "),
                if op.is_active { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    render_table(&columns, &rows);
    println!("({} rows)", rows.len());
    Ok(())
}

/// Create a record from `--set` assignments.
pub fn add(entity: &str, set: &[String], config_path: &std::path::Path) -> Result<()> {
    let assignments = parse_assignments(set)?;
    let mut controller = controller(entity, config_path)?;

    controller.open_for_create();
    for (key, value) in assignments {
        controller.set_field(&key, value);
    }
    controller.save()?;
    println!("{} record created.", entity);
    Ok(())
}

/// Locate a record by the entity's filter pair and update it.
pub fn edit(
    entity: &str,
    date: &str,
    value: &str,
    set: &[String],
    config_path: &std::path::Path,
) -> Result<()> {
    let assignments = parse_assignments(set)?;
    let mut controller = controller(entity, config_path)?;

    controller.search_to_edit(date, value)?;
    for (key, val) in assignments {
        controller.set_field(&key, val);
    }
    controller.save()?;
    println!("{} record updated.", entity);
    Ok(())
}

/// Delete a record by id (confirmation handled by the caller).
pub fn delete(entity: &str, id: i64, config_path: &std::path::Path) -> Result<()> {
    let mut controller = controller(entity, config_path)?;
    controller.request_delete(id);
    controller.confirm_delete()?;
    println!("{} record {} deleted.", entity, id);
    Ok(())
}

/// Show an entity's filter options: first-field values, or the
/// second-field values cascading from `--date`.
pub fn options(
    entity: &str,
    date: Option<&str>,
    output_json: bool,
    config_path: &std::path::Path,
) -> Result<()> {
    if entity == "operators" {
        let client = OperatorClient::new(api(config_path)?);
        let opts = client.options()?;
        if output_json {
            let body: Vec<serde_json::Value> = opts
                .iter()
                .map(|o| serde_json::json!({ "value": o.value, "label": o.label }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else {
            for o in opts {
                println!("{}", o.label);
            }
        }
        return Ok(());
    }

    let controller = controller(entity, config_path)?;
    let opts = match date {
        Some(date) => controller.search_options(date),
        None => controller.filter1_options(),
    };

    if output_json {
        let body: Vec<serde_json::Value> = opts
            .iter()
            .map(|o| serde_json::json!({ "value": o.value, "label": o.label }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        for o in opts {
            println!("{}", o.value);
        }
    }
    Ok(())
}

/// Check server reachability for the current context.
pub fn status(config_path: &std::path::Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = config.require_current()?;

    println!("Context:   {}", ctx.name);
    println!("Server:    {}", if ctx.server.is_empty() { "-" } else { &ctx.server });

    if ctx.server.is_empty() {
        println!("Status:    no server configured");
        return Ok(());
    }

    let api = Api::from_context(ctx)?;
    match api.health() {
        Ok(()) => println!("Status:    connected"),
        Err(e) => println!("Status:    disconnected ({})", e),
    }
    Ok(())
}
