//! Scan display models
//!
//! - [`ScanDisplay`]: one table row per scan
//! - [`ScanCard`]: the pretty list entry
//! - [`ScanDetail`]: the pretty `scan get` view, optionally narrowed to one section

use std::fmt;

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::common::{colored_status, truncate_string};
use crate::cli::Section;
use crate::client::Scan;
use crate::output::formatters::{format_optional_time, format_scan_duration, format_scan_time};

/// Longest domain shown in a table cell
const DOMAIN_WIDTH: usize = 40;

/// Scan display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ScanDisplay {
    #[tabled(rename = "ORDER")]
    pub order: i64,

    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "DOMAIN")]
    pub domain: String,

    #[tabled(rename = "TOOL")]
    pub tool: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Subdomain count, or "--" before results exist
    #[tabled(rename = "SUBDOMAINS")]
    pub subdomains: String,

    /// IP count, or "--" before results exist
    #[tabled(rename = "IPS")]
    pub ips: String,

    #[tabled(rename = "STARTED")]
    pub started: String,

    #[tabled(rename = "DURATION")]
    pub duration: String,
}

impl From<&Scan> for ScanDisplay {
    fn from(scan: &Scan) -> Self {
        let (subdomains, ips) = if scan.results.is_some() {
            (scan.subdomain_count().to_string(), scan.ip_count().to_string())
        } else {
            ("--".to_string(), "--".to_string())
        };

        Self {
            order: scan.display_order,
            id: scan.id,
            domain: truncate_string(&scan.domain, DOMAIN_WIDTH),
            tool: if scan.tool.is_empty() {
                "--".to_string()
            } else {
                scan.tool.clone()
            },
            status: scan.status.to_string(),
            subdomains,
            ips,
            started: format_scan_time(&scan.start_time),
            duration: format_scan_duration(&scan.start_time, scan.end_time.as_deref()),
        }
    }
}

impl From<Scan> for ScanDisplay {
    fn from(scan: Scan) -> Self {
        ScanDisplay::from(&scan)
    }
}

/// Pretty list entry for one scan.
///
/// ```text
/// #0  example.com                                  COMPLETED
///     ID 1 | subfinder | Started May 1, 2024 10:00:00
///     2 subdomains | 1 IP
/// ```
pub struct ScanCard<'a>(pub &'a Scan);

impl fmt::Display for ScanCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scan = self.0;

        writeln!(
            f,
            "{}  {:<45} {}",
            format!("#{}", scan.display_order).dimmed(),
            scan.domain.bold(),
            colored_status(scan.status)
        )?;
        write!(
            f,
            "    ID {} | {} | Started {}",
            scan.id,
            if scan.tool.is_empty() { "--" } else { &scan.tool },
            format_scan_time(&scan.start_time)
        )?;

        if let Some(error) = scan.error_message() {
            write!(f, "\n    {} {}", "Error:".red(), error)?;
        } else if scan.results.is_some() {
            write!(
                f,
                "\n    {} | {}",
                plural(scan.subdomain_count(), "subdomain", "subdomains"),
                plural(scan.ip_count(), "IP", "IPs")
            )?;
        }

        Ok(())
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{} {}", count, one)
    } else {
        format!("{} {}", count, many)
    }
}

/// Pretty detail view of one scan.
pub struct ScanDetail<'a> {
    scan: &'a Scan,
    section: Option<Section>,
}

impl<'a> ScanDetail<'a> {
    pub fn new(scan: &'a Scan) -> Self {
        Self {
            scan,
            section: None,
        }
    }

    /// Show only one results section
    pub fn section(mut self, section: Option<Section>) -> Self {
        self.section = section;
        self
    }

    /// Field/value pairs for the table rendering of a single scan
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let scan = self.scan;
        let mut fields = vec![
            ("ID", scan.id.to_string()),
            ("Domain", scan.domain.clone()),
            ("Tool", scan.tool.clone()),
            ("Status", scan.status.to_string()),
            ("Order", scan.display_order.to_string()),
            ("Started", format_scan_time(&scan.start_time)),
            ("Finished", format_optional_time(scan.end_time.as_deref())),
            (
                "Duration",
                format_scan_duration(&scan.start_time, scan.end_time.as_deref()),
            ),
        ];
        if scan.results.is_some() {
            fields.push(("Subdomains", scan.subdomain_count().to_string()));
            fields.push(("IPs", scan.ip_count().to_string()));
        }
        if let Some(error) = scan.error_message() {
            fields.push(("Error", error.to_string()));
        }
        fields
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scan = self.scan;
        writeln!(f, "Scan: {}", scan.domain.bold())?;
        writeln!(f, "══════════════════════════════════════════════════════")?;
        writeln!(
            f,
            "ID: {} | Tool: {} | Status: {}",
            scan.id,
            scan.tool,
            colored_status(scan.status)
        )?;
        writeln!(
            f,
            "Started: {} | Finished: {} | Duration: {}",
            format_scan_time(&scan.start_time),
            format_optional_time(scan.end_time.as_deref()),
            format_scan_duration(&scan.start_time, scan.end_time.as_deref())
        )?;
        if let Some(error) = scan.error_message() {
            writeln!(f, "{} {}", "Error:".red(), error)?;
        }
        Ok(())
    }

    fn write_list(f: &mut fmt::Formatter<'_>, title: &str, items: Option<&Vec<String>>) -> fmt::Result {
        let items = items.map(Vec::as_slice).unwrap_or_default();
        writeln!(f, "\n{} ({})", title.bold(), items.len())?;
        writeln!(f, "────────────────────────────────────────────────────")?;
        if items.is_empty() {
            writeln!(f, "  {}", "None".dimmed())?;
        }
        for item in items {
            writeln!(f, "  {}", item)?;
        }
        Ok(())
    }

    fn write_raw(f: &mut fmt::Formatter<'_>, raw: Option<&str>) -> fmt::Result {
        writeln!(f, "\n{}", "Raw Output".bold())?;
        writeln!(f, "────────────────────────────────────────────────────")?;
        match raw {
            Some(raw) if !raw.is_empty() => writeln!(f, "{}", raw.trim_end()),
            _ => writeln!(f, "  {}", "None".dimmed()),
        }
    }
}

impl fmt::Display for ScanDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let results = self.scan.results.as_ref();
        let subdomains = results.and_then(|r| r.subdomains.as_ref());
        let ips = results.and_then(|r| r.ips.as_ref());
        let raw = results.and_then(|r| r.raw_output.as_deref());

        match self.section {
            Some(Section::Subdomains) => Self::write_list(f, "Subdomains", subdomains),
            Some(Section::Ips) => Self::write_list(f, "IP Addresses", ips),
            Some(Section::Raw) => Self::write_raw(f, raw),
            None => {
                self.write_header(f)?;
                if results.is_none() {
                    return writeln!(f, "\n{}", "No results yet.".dimmed());
                }
                Self::write_list(f, "Subdomains", subdomains)?;
                Self::write_list(f, "IP Addresses", ips)?;
                Self::write_raw(f, raw)
            }
        }
    }
}
