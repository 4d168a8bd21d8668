#[path = "../fixtures/mod.rs"]
mod fixtures;

mod test_end_to_end;
mod test_main_entry_point;
