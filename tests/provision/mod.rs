mod scenarios;
mod test_helpers;
