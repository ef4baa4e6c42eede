use crate::error::{AppResult, SchemaError, REQUIRED_COLUMNS};
use crate::types::OperationRecord;
use crate::util::{parse_amount, parse_count, parse_year, slug};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

/// Dataset shown before any CSV has been imported or connected.
pub const SAMPLE_CSV: &str = "\
Lider,Operacao,Faturamento,MaoDeObra,Equipamentos,Ano,Mes,Tecnicos,Auxiliares
Clenildo Candeias,BRF CD - Ap. Goiânia,109000,31000,14,2025,9,1,1
Jhonny Carlos,BRF - Carambeí,185000,52000,28,2025,9,1,0
Juvenil Oliveira,BRF - Mineiros,158000,45000,23,2025,9,2,1
";

/// Resolved column positions for one header row.
struct Columns {
    leader: usize,
    operation: usize,
    revenue: usize,
    labor_cost: usize,
    equipment: usize,
    year: usize,
    month: usize,
    technicians: Option<usize>,
    auxiliaries: Option<usize>,
}

impl Columns {
    fn resolve(header: &StringRecord) -> Result<Self, SchemaError> {
        let names: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| names.iter().position(|h| h == name);

        // Positions follow the order of REQUIRED_COLUMNS.
        let positions: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|c| find(*c)).collect();
        let Some(idx) = positions.iter().copied().collect::<Option<Vec<usize>>>() else {
            let missing = REQUIRED_COLUMNS
                .iter()
                .zip(&positions)
                .filter(|(_, p)| p.is_none())
                .map(|(c, _)| c.to_string())
                .collect();
            return Err(SchemaError::MissingColumns { missing });
        };

        Ok(Columns {
            leader: idx[0],
            operation: idx[1],
            revenue: idx[2],
            labor_cost: idx[3],
            equipment: idx[4],
            year: idx[5],
            month: idx[6],
            technicians: find("tecnicos"),
            auxiliaries: find("auxiliares"),
        })
    }
}

fn is_blank_line(rec: &StringRecord) -> bool {
    rec.len() == 1 && rec.get(0).map_or(true, |f| f.trim().is_empty())
}

/// Parse delimited text into operation records.
///
/// The first non-blank line is the header; columns are looked up by name, so
/// their order does not matter. Fields are split on `,` with no quoting
/// support. Numeric cells that cannot be read become zero. The whole input
/// is rejected if the header lacks a required column or a row has a blank
/// leader or operation name.
pub fn parse_csv(text: &str) -> Result<Vec<OperationRecord>, SchemaError> {
    // The default terminator also breaks on a lone `\r`, not only `\n`/`\r\n`.
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut lines = Vec::new();
    for result in rdr.records() {
        let rec = result.map_err(|e| SchemaError::Malformed(e.to_string()))?;
        if !is_blank_line(&rec) {
            lines.push(rec);
        }
    }

    let mut iter = lines.into_iter();
    let header = iter.next().ok_or(SchemaError::Empty)?;
    let cols = Columns::resolve(&header)?;

    let mut records = Vec::new();
    for rec in iter {
        let line = rec.position().map_or(0, |p| p.line() as usize);
        let cell = |i: usize| rec.get(i).unwrap_or("").trim().to_string();

        let leader = cell(cols.leader);
        if leader.is_empty() {
            return Err(SchemaError::BlankValue { line, column: "lider" });
        }
        let operation_name = cell(cols.operation);
        if operation_name.is_empty() {
            return Err(SchemaError::BlankValue { line, column: "operacao" });
        }
        let optional = |i: Option<usize>| i.map_or(0, |i| parse_count(rec.get(i)));

        records.push(OperationRecord {
            operation_id: format!("op-{}", slug(&operation_name)),
            leader,
            operation_name,
            revenue: parse_amount(rec.get(cols.revenue)),
            labor_cost: parse_amount(rec.get(cols.labor_cost)),
            equipment_count: parse_count(rec.get(cols.equipment)),
            year: parse_year(rec.get(cols.year)),
            month: parse_count(rec.get(cols.month)),
            technician_count: optional(cols.technicians),
            auxiliary_count: optional(cols.auxiliaries),
        });
    }

    debug!(rows = records.len(), "parsed CSV");
    Ok(records)
}

pub fn load_file(path: &str) -> AppResult<Vec<OperationRecord>> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_csv(&text)?;
    info!(path, rows = records.len(), "loaded CSV file");
    Ok(records)
}

pub fn sample_records() -> Vec<OperationRecord> {
    // The bundled sample is known to satisfy the schema.
    parse_csv(SAMPLE_CSV).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "lider,operacao,faturamento,maodeobra,equipamentos,ano,mes";

    #[test]
    fn parses_single_row() {
        let rows = parse_csv(&format!("{HEADER}\nA,OP,100,10,2,2025,9")).unwrap();
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.leader, "A");
        assert_eq!(r.operation_name, "OP");
        assert_eq!(r.revenue, 100.0);
        assert_eq!(r.labor_cost, 10.0);
        assert_eq!(r.equipment_count, 2);
        assert_eq!(r.year, 2025);
        assert_eq!(r.month, 9);
        assert_eq!(r.operation_id, "op-op");
    }

    #[test]
    fn column_order_does_not_matter() {
        let a = parse_csv(&format!("{HEADER}\nA,OP,100,10,2,2025,9")).unwrap();
        let b = parse_csv("MES, Ano ,equipamentos,MaoDeObra,faturamento,operacao,LIDER\n9,2025,2,10,100,OP,A")
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn crlf_and_lf_parse_identically() {
        let lf = parse_csv(&format!("{HEADER}\nB,OP,200,20,3,2025,9\nC,X,1,1,1,2024,1")).unwrap();
        let crlf =
            parse_csv(&format!("{HEADER}\r\nB,OP,200,20,3,2025,9\r\nC,X,1,1,1,2024,1\r\n")).unwrap();
        assert_eq!(lf, crlf);
        assert_eq!(lf[0].leader, "B");
    }

    #[test]
    fn optional_staffing_columns() {
        let without = parse_csv(&format!("{HEADER}\nF,OP,500,50,6,2025,9")).unwrap();
        assert_eq!(without[0].technician_count, 0);
        assert_eq!(without[0].auxiliary_count, 0);

        let with = parse_csv(&format!("{HEADER},tecnicos,auxiliares\nC,OP,300,30,4,2025,9,1,2")).unwrap();
        assert_eq!(with[0].technician_count, 1);
        assert_eq!(with[0].auxiliary_count, 2);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let text = format!("\n  \n{HEADER}\nD,OP,400,40,5,2025,9\n\n   \nE,OP2,1,1,1,2025,9\n\n\n");
        let rows = parse_csv(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].leader, "D");
        assert_eq!(rows[1].leader, "E");
    }

    #[test]
    fn rejects_missing_columns() {
        match parse_csv("lider,operacao\nE,OP") {
            Err(SchemaError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["faturamento", "maodeobra", "equipamentos", "ano", "mes"]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn reports_every_missing_column_once() {
        match parse_csv("operacao,ano,extra\nOP,2025,x") {
            Err(SchemaError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["lider", "faturamento", "maodeobra", "equipamentos", "mes"]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn fractional_year_and_month_truncate() {
        let rows = parse_csv(&format!("{HEADER}\nA,OP,1,1,1,2025.0,9.0")).unwrap();
        assert_eq!(rows[0].year, 2025);
        assert_eq!(rows[0].month, 9);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_csv(""), Err(SchemaError::Empty));
        assert_eq!(parse_csv("\n \r\n\t\n"), Err(SchemaError::Empty));
    }

    #[test]
    fn rejects_blank_leader_for_whole_input() {
        let err = parse_csv(&format!("{HEADER}\nA,OP,1,1,1,2025,9\n ,OP2,1,1,1,2025,9")).unwrap_err();
        assert_eq!(err, SchemaError::BlankValue { line: 3, column: "lider" });
    }

    #[test]
    fn lenient_numeric_cells() {
        let rows = parse_csv(&format!("{HEADER}\nG,OP,, , ,2025,9")).unwrap();
        assert_eq!(rows[0].revenue, 0.0);
        assert_eq!(rows[0].labor_cost, 0.0);
        assert_eq!(rows[0].equipment_count, 0);

        let rows = parse_csv(&format!("{HEADER}\nG,OP,abc,12,many,,")).unwrap();
        assert_eq!(rows[0].revenue, 0.0);
        assert_eq!(rows[0].labor_cost, 12.0);
        assert_eq!(rows[0].equipment_count, 0);
        assert_eq!(rows[0].year, 0);
        assert_eq!(rows[0].month, 0);
    }

    #[test]
    fn short_rows_default_missing_cells() {
        let rows = parse_csv(&format!("{HEADER}\nH,OP,10")).unwrap();
        assert_eq!(rows[0].revenue, 10.0);
        assert_eq!(rows[0].month, 0);
    }

    #[test]
    fn quotes_are_not_interpreted() {
        let rows = parse_csv(&format!("{HEADER}\n\"A\",OP,1,1,1,2025,9")).unwrap();
        assert_eq!(rows[0].leader, "\"A\"");
    }

    #[test]
    fn sample_dataset_parses() {
        let rows = sample_records();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].operation_name, "BRF - Carambeí");
        assert_eq!(rows[2].technician_count, 2);
    }

    #[test]
    fn load_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.csv");
        std::fs::write(&path, format!("{HEADER}\nA,OP,100,10,2,2025,9\n")).unwrap();
        let rows = load_file(path.to_str().unwrap()).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
