use crate::core::selection::MIN_COMPARE;
use crate::domain::model::College;
use crate::utils::error::{PortalError, Result};
use serde::Serialize;

/// 比較表內文的固定列順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Attribute {
    Name,
    State,
    YearOfEstablishment,
    Duration,
    Recognition,
    Medium,
    Intake,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::Name,
        Attribute::State,
        Attribute::YearOfEstablishment,
        Attribute::Duration,
        Attribute::Recognition,
        Attribute::Medium,
        Attribute::Intake,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Name => "Name",
            Attribute::State => "State",
            Attribute::YearOfEstablishment => "Year of Establishment",
            Attribute::Duration => "Duration",
            Attribute::Recognition => "Recognition",
            Attribute::Medium => "Medium",
            Attribute::Intake => "Intake",
        }
    }

    pub fn render(&self, college: &College) -> String {
        match self {
            Attribute::Name => college.name.clone(),
            Attribute::State => college.location(),
            Attribute::YearOfEstablishment => college.year_of_establishment.to_string(),
            Attribute::Duration => college.duration.clone(),
            Attribute::Recognition => college.recognition.clone(),
            Attribute::Medium => college.medium.clone(),
            Attribute::Intake => college.intake.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub path: String,
}

impl Link {
    fn to_college(label: &str, college: &College) -> Self {
        Self {
            label: label.to_string(),
            path: college.detail_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub college_id: String,
    pub name: String,
    pub logo_link: String,
    pub location: String,
    pub detail: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub attribute: Attribute,
    pub label: &'static str,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRow {
    pub label: &'static str,
    pub links: Vec<Link>,
}

/// 欄 = 學校，列 = 屬性
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<TableRow>,
    pub actions: ActionRow,
}

pub const HEADER_LABEL: &str = "Attributes";
pub const ACTIONS_LABEL: &str = "Actions";

pub fn build(colleges: &[College]) -> Result<ComparisonTable> {
    if colleges.len() < MIN_COMPARE {
        return Err(PortalError::InsufficientSelection {
            selected: colleges.len(),
        });
    }

    let header = colleges
        .iter()
        .map(|college| HeaderCell {
            college_id: college.id.clone(),
            name: college.name.clone(),
            logo_link: college.logo_link.clone(),
            location: college.location(),
            detail: Link::to_college("Know University in 2 Min", college),
        })
        .collect();

    let rows = Attribute::ALL
        .iter()
        .map(|attribute| TableRow {
            attribute: *attribute,
            label: attribute.label(),
            values: colleges.iter().map(|college| attribute.render(college)).collect(),
        })
        .collect();

    let actions = ActionRow {
        label: ACTIONS_LABEL,
        links: colleges
            .iter()
            .map(|college| Link::to_college("Know More", college))
            .collect(),
    };

    tracing::debug!("Built comparison table for {} colleges", colleges.len());

    Ok(ComparisonTable {
        header,
        rows,
        actions,
    })
}

impl ComparisonTable {
    /// 表頭 + 七列屬性 + 動作列
    pub fn row_count(&self) -> usize {
        self.rows.len() + 2
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn column_ids(&self) -> Vec<&str> {
        self.header.iter().map(|cell| cell.college_id.as_str()).collect()
    }

    pub fn row(&self, attribute: Attribute) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.attribute == attribute)
    }

    fn grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.row_count());

        let mut header = vec![HEADER_LABEL.to_string()];
        header.extend(self.header.iter().map(|cell| cell.name.clone()));
        grid.push(header);

        for row in &self.rows {
            let mut line = vec![row.label.to_string()];
            line.extend(row.values.iter().cloned());
            grid.push(line);
        }

        let mut actions = vec![self.actions.label.to_string()];
        actions.extend(
            self.actions
                .links
                .iter()
                .map(|link| format!("{} ({})", link.label, link.path)),
        );
        grid.push(actions);

        grid
    }

    /// 終端機用的對齊文字表
    pub fn render_text(&self) -> String {
        let grid = self.grid();
        let columns = self.column_count() + 1;
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                grid.iter()
                    .filter_map(|line| line.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_line = |line: &[String]| {
            line.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let separator = widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-");

        let mut out = Vec::with_capacity(grid.len() + 1);
        for (index, line) in grid.iter().enumerate() {
            out.push(format_line(line.as_slice()));
            if index == 0 {
                out.push(separator.clone());
            }
        }
        out.join("\n")
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for line in self.grid() {
            writer.write_record(&line)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| PortalError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            PortalError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
