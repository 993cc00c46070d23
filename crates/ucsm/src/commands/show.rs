//! Read-only `show` handlers.

use std::collections::HashMap;

use tabled::Tabled;

use ucsm_core::{Controller, Dn, PooledVlan, Vlan, VlanGroup};

use crate::cli::{GlobalOpts, ShowArgs, ShowCommand};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct VlanRow {
    #[tabled(rename = "ID")]
    id: u16,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Fabric")]
    fabric: String,
    #[tabled(rename = "Sharing")]
    sharing: String,
    #[tabled(rename = "DN")]
    dn: String,
}

impl From<&Vlan> for VlanRow {
    fn from(v: &Vlan) -> Self {
        Self {
            id: v.id,
            name: v.name.clone(),
            fabric: v.fabric.to_string(),
            sharing: v.sharing.clone().unwrap_or_else(|| "-".into()),
            dn: v.dn.to_string(),
        }
    }
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "DN")]
    dn: String,
}

impl From<&VlanGroup> for GroupRow {
    fn from(g: &VlanGroup) -> Self {
        Self {
            name: g.name.clone(),
            dn: g.dn.to_string(),
        }
    }
}

#[derive(Tabled)]
struct PooledRow {
    #[tabled(rename = "VLAN")]
    name: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "DN")]
    dn: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &mut Controller,
    args: ShowArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ShowCommand::Vlan { vlan_id } => {
            let vlans = controller.show_vlan(vlan_id).await?;
            if vlans.is_empty() && !global.quiet {
                eprintln!("No VLAN with id {vlan_id}");
            }
            let out = output::render_list(&global.output, &vlans, |v| VlanRow::from(v), |v| {
                v.dn.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShowCommand::Groups => {
            let groups = controller.show_vlan_groups().await?;
            let out = output::render_list(&global.output, &groups, |g| GroupRow::from(g), |g| {
                g.name.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShowCommand::Pooled { group } => {
            let groups = controller.show_vlan_groups().await?;
            let mut pooled = controller.show_pooled_vlans().await?;

            if let Some(name) = group {
                let wanted = groups
                    .iter()
                    .find(|g| g.name == name)
                    .ok_or_else(|| CliError::GroupNotFound {
                        name: name.clone(),
                        available: groups
                            .iter()
                            .map(|g| g.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })?;
                pooled.retain(|p| p.group_dn.as_ref() == Some(&wanted.dn));
            }

            let names: HashMap<&Dn, &str> =
                groups.iter().map(|g| (&g.dn, g.name.as_str())).collect();
            let to_row = |p: &PooledVlan| PooledRow {
                name: p.name.clone(),
                group: p
                    .group_dn
                    .as_ref()
                    .and_then(|dn| names.get(dn).copied())
                    .unwrap_or("-")
                    .to_owned(),
                dn: p.dn.to_string(),
            };
            let out = output::render_list(&global.output, &pooled, to_row, |p| p.dn.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
