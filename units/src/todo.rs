/// Units which are simply type aliases for `f32` rather than having an
/// implementation as a `uom` `Quantity`.
///
/// Projection images are large, dense and handed to image encoders which know
/// nothing about `uom`, so their samples are plain `f32`s; these aliases leave
/// some clues in the source as to what they represent.

pub type Intensityf32 = f32;
pub type Thicknessf32 = f32; // micrometres
