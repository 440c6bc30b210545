pub mod sgaction;
