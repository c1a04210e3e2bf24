use super::*;

fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn defaults_are_min_run_24_and_default_format() {
    let opts = parse(&args(&["a.txt", "b.txt"])).unwrap();
    assert_eq!(opts.min_run, DEFAULT_MIN_RUN);
    assert_eq!(opts.format, OutputFormat::Default);
    assert_eq!(opts.threshold, DEFAULT_THRESHOLD);
    assert!(!opts.lex_scan_only);
}

#[test]
fn zero_min_run_is_rejected() {
    let err = parse(&args(&["-r", "0", "a.txt"])).unwrap_err();
    assert!(matches!(err, SimError::Usage(_)));
}

#[test]
fn zero_width_is_rejected() {
    let err = parse(&args(&["-w", "0", "a.txt"])).unwrap_err();
    assert!(matches!(err, SimError::Usage(_)));
}

#[test]
fn percentage_implies_each_to_each_and_no_self() {
    let opts = parse(&args(&["-p", "a.txt", "b.txt"])).unwrap();
    assert!(opts.compare.each_to_each);
    assert!(opts.compare.no_self);
    assert_eq!(opts.format, OutputFormat::Percentage { main_contributor_only: false });
}

#[test]
fn percentage_main_only_implies_percentage() {
    let opts = parse(&args(&["-P", "a.txt", "b.txt"])).unwrap();
    assert_eq!(opts.format, OutputFormat::Percentage { main_contributor_only: true });
    assert!(opts.compare.each_to_each);
}

#[test]
fn conflicting_output_formats_are_rejected() {
    let err = parse(&args(&["-d", "-T", "a.txt"])).unwrap_err();
    assert!(matches!(err, SimError::Usage(_)));
}

#[test]
fn threshold_without_percentage_is_rejected() {
    let err = parse(&args(&["-t", "50", "a.txt"])).unwrap_err();
    assert!(matches!(err, SimError::Usage(_)));
}

#[test]
fn threshold_out_of_range_is_rejected() {
    let err = parse(&args(&["-p", "-t", "101", "a.txt"])).unwrap_err();
    assert!(matches!(err, SimError::Usage(_)));
}

#[test]
fn stdin_flag_with_file_args_is_rejected() {
    let err = parse(&args(&["-i", "a.txt"])).unwrap_err();
    assert!(matches!(err, SimError::Usage(_)));
}

#[test]
fn double_dash_sets_lex_scan_only_and_is_stripped_from_files() {
    let opts = parse(&args(&["--", "a.txt"])).unwrap();
    assert!(opts.lex_scan_only);
    assert_eq!(opts.new_files, vec!["a.txt".to_string()]);
}

#[test]
fn separator_splits_file_list_into_new_and_old() {
    let opts = parse(&args(&["-S", "a.txt", "/", "b.txt"])).unwrap();
    assert_eq!(opts.new_files, vec!["a.txt".to_string()]);
    assert_eq!(opts.old_files, vec!["b.txt".to_string()]);
    assert!(opts.compare.new_vs_old);
}

#[test]
fn short_v_is_distinct_from_clap_version() {
    let opts = parse(&args(&["-v"])).unwrap();
    assert!(opts.print_version);
}
