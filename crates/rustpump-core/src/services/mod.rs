pub mod bolus;
