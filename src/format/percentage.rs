//! Percentage table (`-p`/`-P`): `Show_Percentages`'s output, one line per
//! surviving match record in the wording the invariant tests pin down
//! ("A consists for N % of B material").

use std::io::{self, Write};

use crate::percent::MatchRecord;
use crate::report_helpers::separator;

pub fn write(out: &mut dyn Write, records: &[MatchRecord], width: usize) -> io::Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", separator(width))?;
    for rec in records {
        writeln!(
            out,
            "{} consists for {:>3} % of {} material",
            rec.fname0,
            rec.percentage(),
            rec.fname1
        )?;
    }
    writeln!(out, "{}", separator(width))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn rec(f0: &str, f1: &str, covered: u64, size0: u64) -> MatchRecord {
        MatchRecord { fname0: Arc::from(f0), fname1: Arc::from(f1), covered, size0 }
    }

    #[test]
    fn full_match_prints_100_percent_wording() {
        let records = vec![rec("a.txt", "b.txt", 100, 100)];
        let mut out = Vec::new();
        write(&mut out, &records, 40).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a.txt consists for 100 % of b.txt material"));
    }

    #[test]
    fn empty_records_prints_nothing() {
        let mut out = Vec::new();
        write(&mut out, &[], 40).unwrap();
        assert!(out.is_empty());
    }
}
