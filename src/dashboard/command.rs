pub mod get_totals_cmd;
