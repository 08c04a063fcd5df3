use micromath::vector::F32x3;
#[allow(unused_imports)]
use micromath::F32Ext;

// Euclidean norm of a three axis reading.
pub fn magnitude(v: F32x3) -> f32 {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}

// Norm of the acceleration with gravity taken off the z axis. No orientation
// correction: the sensor z axis is expected to point along gravity at rest.
pub fn gravity_compensated_magnitude(accel: F32x3, gravity: f32) -> f32 {
    magnitude(F32x3 {
        x: accel.x,
        y: accel.y,
        z: accel.z - gravity,
    })
}
