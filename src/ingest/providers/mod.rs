pub mod adzuna;
