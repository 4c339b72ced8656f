//! Pad laser : noyau d’expressions (jetons -> RPN -> évaluation) + app egui.
//!
//! - `noyau` : compile une expression `f(x, y)` une fois, l’évalue à chaque échantillon
//! - `app`   : état, liaison réactive (debounce), mouvement du pad, vue egui

pub mod app;
pub mod noyau;
