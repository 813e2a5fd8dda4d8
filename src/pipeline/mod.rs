pub mod stage1_parse;
pub mod stage2_aggregate;
pub mod stage3_merge;
pub mod stage4_report;
