//! Integration tests for the soft3d crates.
//!
//! These tests exercise the math types together with the shared array and
//! streaming layer, the way a renderer or physics step would use them.

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::{BufReader, BufWriter, Write};
    use std::thread;

    use sha2::{Digest, Sha256};
    use soft3d_core::prelude::*;
    use soft3d_math::{
        EulerOrder, Fixed, Mat3, Mat3d, Mat3x, Mat4d, Mat4x, Real, Vec3, Vec3d, Vec3dArray,
        Vec3fArray, Vec3x, Vec4, Vec4d,
    };
    use tempfile::tempdir;

    fn sample_positions() -> Vec<Vec3d> {
        (0..64)
            .map(|i| {
                let t = i as f64 * 0.1;
                Vec3::new(t.cos() * 2.0, t.sin(), t * 0.25 - 1.0)
            })
            .collect()
    }

    /// Vertex buffer written to disk and read back.
    #[test]
    fn test_vertex_buffer_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("positions.bin");

        let positions = Vec3fArray::from_vec(
            sample_positions()
                .iter()
                .map(|p| Vec3::new(p.x as f32, p.y as f32, p.z as f32))
                .collect(),
        );

        let mut writer = BufWriter::new(File::create(&path).unwrap());
        positions.write_to(&mut writer).unwrap();
        writer.flush().unwrap();
        drop(writer);

        assert_eq!(
            std::fs::metadata(&path).unwrap().len() as usize,
            positions.stream_size()
        );

        let mut reader = BufReader::new(File::open(&path).unwrap());
        let loaded = Vec3fArray::read_from(&mut reader).unwrap();
        assert_eq!(loaded, positions);
    }

    /// Transform a shared mesh and undo the transform with the inverse.
    #[test]
    fn test_transform_pipeline() {
        let rot = Mat3d::from_euler(EulerOrder::Zyx, [0.4, -0.3, 1.1]);
        let mut model = Mat4d::IDENTITY;
        for r in 0..3 {
            for c in 0..3 {
                model[(r, c)] = rot[(r, c)];
            }
        }
        model[(0, 3)] = 5.0;
        model[(1, 3)] = -2.0;
        model[(2, 3)] = 0.5;

        let mesh = Vec3dArray::from_vec(sample_positions());
        let view = mesh.share();

        let to_world = |p: Vec3d| {
            let h = model * Vec4::new(p.x, p.y, p.z, 1.0);
            Vec3::new(h.x, h.y, h.z)
        };
        let world: Vec<Vec3d> = view.as_slice().iter().map(|&p| to_world(p)).collect();

        let inv = model.inverse();
        for (w, p) in world.iter().zip(mesh.as_slice()) {
            let back = inv * Vec4d::new(w.x, w.y, w.z, 1.0);
            assert!((Vec3::new(back.x, back.y, back.z) - *p).length() < 1e-10);
        }

        // Rigid transforms preserve distances.
        let a = mesh[3] - mesh[40];
        let b = world[3] - world[40];
        assert!((a.length() - b.length()).abs() < 1e-10);
    }

    #[test]
    fn test_reflection_is_involution() {
        let n = Vec3d::new(1.0, 2.0, 2.0).normalized();
        let p = Vec3d::new(0.5, -1.0, 3.0);
        let refl = Mat4d::make_reflection(n, p);
        let twice = refl * refl;
        for (x, y) in twice.as_slice().iter().zip(Mat4d::IDENTITY.as_slice()) {
            assert!((x - y).abs() < 1e-12);
        }
        assert!((refl.determinant() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inertia_tensor_principal_axes() {
        // Box of half extents (1, 2, 3) rotated into world space.
        let local = Mat3d::diagonal(Vec3::new(13.0, 10.0, 5.0));
        let rot = Mat3d::from_axis_angle(Vec3::new(0.0, 0.6, 0.8), 0.7);
        let world = (rot * local).times_transpose(&rot);

        let (axes, moments) = world.eigen_decomposition();
        assert!((moments[(0, 0)] - 5.0).abs() < 1e-10);
        assert!((moments[(1, 1)] - 10.0).abs() < 1e-10);
        assert!((moments[(2, 2)] - 13.0).abs() < 1e-10);

        // Smallest moment lies along the longest extent: local Z.
        let axis = axes.column(0);
        let expected = rot.column(2);
        assert!((axis.dot(expected).abs() - 1.0).abs() < 1e-10);
    }

    fn fixed_step(seed: i32) -> Vec<u8> {
        let angle = Fixed::from_num(seed) / Fixed::from_num(7);
        let rot = Mat3x::from_euler(EulerOrder::Xyz, [angle, -angle, angle / Fixed::from_num(2)]);
        let tensor = (rot * Mat3x::diagonal(Vec3x::new(
            Fixed::from_num(3),
            Fixed::from_num(2),
            Fixed::ONE,
        )))
        .times_transpose(&rot);
        let (axes, moments) = tensor.eigen_decomposition();
        let proj = Mat4x::make_perspective_projection(
            Vec3x::UNIT_Z,
            Vec3x::ZERO,
            Vec3x::new(Fixed::ZERO, Fixed::ZERO, Fixed::from_num(5)),
        );

        let mut bytes = Vec::new();
        for m in [rot, axes, moments, rot.inverse()] {
            m.write_to(&mut bytes).unwrap();
        }
        proj.write_to(&mut bytes).unwrap();
        bytes
    }

    /// Fixed-point results are bit-identical regardless of which thread
    /// computes them.
    #[test]
    fn test_fixed_point_determinism() {
        let reference: Vec<[u8; 32]> = (1..5)
            .map(|s| Sha256::digest(fixed_step(s)).into())
            .collect();

        let handles: Vec<_> = (1..5)
            .map(|s| thread::spawn(move || -> [u8; 32] { Sha256::digest(fixed_step(s)).into() }))
            .collect();
        for (h, expected) in handles.into_iter().zip(&reference) {
            assert_eq!(&h.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_fixed_tracks_float() {
        let angles = [0.3, -0.2, 0.9];
        let d = Mat3d::from_euler(EulerOrder::Yzx, angles);
        let x = Mat3x::from_euler(EulerOrder::Yzx, angles.map(Fixed::from_num));
        for (a, b) in d.as_slice().iter().zip(x.as_slice()) {
            assert!((a - b.to_f64()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let m = Mat3d::from_axis_angle(Vec3::UNIT_Y, 0.25);
        let json = serde_json::to_string(&m).unwrap();
        let back: Mat3d = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        let v = Vec3x::new(Fixed::PI, -Fixed::ONE, Fixed::from_num(0.5));
        let json = serde_json::to_string(&v).unwrap();
        let back: Vec3x = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);

        let p = Vec3d::new(0.968_912_421_710_644_7, 0.1 + 0.2, 1.0 / 3.0);
        let json = serde_json::to_string(&p).unwrap();
        let back: Vec3d = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_array().map(f64::to_bits), p.to_array().map(f64::to_bits));

        let e = Mat3::<f64>::IDENTITY.to_euler(EulerOrder::Xzy);
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("Unique"));
    }

    #[test]
    fn test_shared_array_across_copy_modes() {
        let base = Vec3dArray::from_vec(sample_positions());
        let shared = base.duplicate(CopyMode::Share);
        let deep = base.duplicate(CopyMode::Deep);
        assert_eq!(base.ref_count(), 2);
        assert!(base.ptr_eq(&shared));
        assert!(!base.ptr_eq(&deep));
        assert_eq!(deep.as_slice(), base.as_slice());

        let weak = base.downgrade();
        drop(base);
        assert!(!weak.is_released());
        drop(shared);
        assert!(weak.is_released());
    }
}
