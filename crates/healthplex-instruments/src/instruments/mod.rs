pub mod metabolic;
