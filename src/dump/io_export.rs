// Primitives for writing the rows out.

use chrono::Local;
use csv::WriterBuilder;

use crate::dump::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> DumpResult<ExportFormat> {
        match name.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            _ => UnknownFormatSnafu { format: name }.fail(),
        }
    }

    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            ExportFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// Renders the rows in the given format.
///
/// The headers are the column names of `NormalizedRow`. They are never written for json.
pub fn to_export_string(
    rows: &[NormalizedRow],
    format: ExportFormat,
    include_headers: bool,
) -> DumpResult<String> {
    if format == ExportFormat::Json {
        let mut s = serde_json::to_string_pretty(rows).context(WritingJsonSnafu {})?;
        s.push('\n');
        return Ok(s);
    }

    let mut bytes: Vec<u8> = Vec::new();
    {
        let mut wtr = WriterBuilder::new()
            .delimiter(format.delimiter())
            .has_headers(include_headers)
            .from_writer(&mut bytes);
        for row in rows.iter() {
            wtr.serialize(row).context(WritingCsvSnafu {})?;
        }
        wtr.flush().context(FlushingExportSnafu {})?;
    }
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

pub fn write_export(path: &str, text: &str) -> DumpResult<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(WritingFileSnafu { path })?;
        }
    }
    fs::write(path, text).context(WritingFileSnafu { path })
}

/// `bgg_dump_{count}_{timestamp}.{ext}`, in the current directory.
pub fn default_file_name(count: usize, format: ExportFormat) -> String {
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    format!("bgg_dump_{}_{}.{}", count, timestamp, format.ext())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Rank,Title,Year,Rating,Weight,Type,Min Players,Max Players,\
Community Player Count Min,Community Player Count Max,\
Community Best Player Count Min,Community Best Player Count Max,\
Playing Time Min,Playing Time Max,Age,Community Age,Designers,Artists,Categories";

    fn sample_row() -> NormalizedRow {
        let na = || NOT_AVAILABLE.to_string();
        NormalizedRow {
            rank: "3".to_string(),
            title: "Gloomhaven".to_string(),
            year: "2017".to_string(),
            rating: "8.6".to_string(),
            weight: "3.9".to_string(),
            type_label: "Strategy Game(2), Thematic(1)".to_string(),
            min_players: "1".to_string(),
            max_players: "4".to_string(),
            community_player_min: "1".to_string(),
            community_player_max: "4".to_string(),
            community_best_player_min: "2".to_string(),
            community_best_player_max: "3".to_string(),
            playing_time_min: na(),
            playing_time_max: na(),
            age: "14".to_string(),
            community_age: "14".to_string(),
            designers: "Isaac Childres".to_string(),
            artists: "Alexandr Elichev; Josh T. McDowell".to_string(),
            categories: "Adventure; Exploration".to_string(),
        }
    }

    #[test]
    fn csv_with_headers() {
        let text = to_export_string(&[sample_row()], ExportFormat::Csv, true).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "3,Gloomhaven,2017,8.6,3.9,\"Strategy Game(2), Thematic(1)\",1,4,1,4,2,3,N/A,N/A,\
14,14,Isaac Childres,Alexandr Elichev; Josh T. McDowell,Adventure; Exploration"
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn tsv_without_headers() {
        let text = to_export_string(&[sample_row()], ExportFormat::Tsv, false).unwrap();
        let fields: Vec<&str> = text.trim_end().split('\t').collect();
        assert_eq!(fields.len(), 19);
        assert_eq!(fields[5], "Strategy Game(2), Thematic(1)");
        assert_eq!(fields[18], "Adventure; Exploration");
    }

    #[test]
    fn json_keys_are_headers() {
        let text = to_export_string(&[sample_row()], ExportFormat::Json, true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v[0]["Title"], "Gloomhaven");
        assert_eq!(v[0]["Community Best Player Count Max"], "3");
        assert_eq!(v[0]["Playing Time Min"], NOT_AVAILABLE);
    }

    #[test]
    fn format_names() {
        assert_eq!(ExportFormat::from_name("CSV").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_name(" tsv").unwrap(), ExportFormat::Tsv);
        assert!(matches!(
            ExportFormat::from_name("xlsx"),
            Err(DumpError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn default_name() {
        let name = default_file_name(20, ExportFormat::Tsv);
        assert!(name.starts_with("bgg_dump_20_"));
        assert!(name.ends_with(".tsv"));
        // bgg_dump_20_ + 14 digits + .tsv
        assert_eq!(name.len(), 12 + 14 + 4);
    }

    #[test]
    fn write_creates_directories() {
        let dir = std::env::temp_dir().join(format!("bggdump_export_{}", std::process::id()));
        let path = dir.join("nested").join("out.csv");
        let path_s = path.display().to_string();
        write_export(&path_s, "a,b\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n");
        fs::remove_dir_all(&dir).unwrap();
    }
}
