//! Prints the disc enumeration order and the angle utilities; no window.

use skuggi::prelude::*;

fn main() {
    let center = Vec3::new(0.3, -0.2, 0.0);
    for radius in [0.0f32, 1.0, 2.0] {
        let cells = coordinates_in_disc(center, radius);
        println!("radius {radius}: {} cells", cells.len());
        for cell in &cells {
            println!(
                "  ({:5.1}, {:5.1})  dist {:.2}",
                cell.x,
                cell.y,
                (*cell - center).length()
            );
        }
    }

    let from = Vec3::ZERO;
    let to = Vec3::new(1.0, 1.0, 0.0);
    println!("angle_between: {:.3} rad", angle_between(from, to));
    println!("modulo(-1.0, 4.0) = {}", modulo(-1.0, 4.0));
}
