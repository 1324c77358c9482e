use super::*;
use crate::BondAngles;
use nalgebra::{vector, Vector3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};

fn orthonormal() -> BondTriple {
    BondTriple::from_vectors([
        vector![1.0, 0.0, 0.0],
        vector![0.0, 1.0, 0.0],
        vector![0.0, 0.0, 1.0],
    ])
    .unwrap()
}

fn planar_sp2(r: f64) -> BondTriple {
    let at = |deg: f64| {
        let a = deg.to_radians();
        vector![r * a.cos(), r * a.sin(), 0.0]
    };
    BondTriple::from_vectors([at(0.0), at(120.0), at(240.0)]).unwrap()
}

// Three of the four bonds of an ideal sp3 centre.
fn tetrahedral() -> BondTriple {
    BondTriple::from_vectors([
        vector![1.0, 1.0, 1.0],
        vector![1.0, -1.0, -1.0],
        vector![-1.0, 1.0, -1.0],
    ])
    .unwrap()
}

// Symmetric pyramid around +z; each bond makes angle π/2 + theta_p with +z.
fn pyramid(theta_p: f64, lengths: [f64; 3]) -> BondTriple {
    let vs: [Vector3<f64>; 3] = std::array::from_fn(|i| {
        let phi = 2.0 * PI * i as f64 / 3.0;
        lengths[i] * vector![theta_p.cos() * phi.cos(), theta_p.cos() * phi.sin(), -theta_p.sin()]
    });
    BondTriple::from_vectors(vs).unwrap()
}

#[test]
fn orthonormal_unit_triple_product_is_one() {
    let p = Poav1::new(&orthonormal());
    assert!((p.base().triple_product() - 1.0).abs() < 1e-12);
    assert!((p.base().t0() - 1.0 / 6.0).abs() < 1e-12);
    assert!((p.volume() - 1.0 / 6.0).abs() < 1e-12);
    // reciprocal basis of an orthonormal frame is the frame itself
    let r = p.base().reciprocals();
    assert!((r[0] - vector![1.0, 0.0, 0.0]).norm() < 1e-12);
    assert!((r[2] - vector![0.0, 0.0, 1.0]).norm() < 1e-12);
    let vpi = p.base().vpi().unwrap();
    assert!((vpi - vector![1.0, 1.0, 1.0]).norm() < 1e-12);
    assert!((p.area().unwrap() - 3f64.sqrt()).abs() < 1e-12);
    assert!((p.curvature().unwrap() - 3.0 * (1.0 / 6.0) / 3f64.sqrt()).abs() < 1e-12);
}

#[test]
fn poavr_volume_scales_with_bond_lengths() {
    let lengths = [1.42, 1.38, 1.51];
    let bonds = pyramid(0.2, lengths);
    let p = PoavR::new(&bonds);
    let expected = lengths.iter().product::<f64>() * p.base().t0();
    assert!((p.volume() - expected).abs() < 1e-12);
    // v_i are the raw bonds
    for (v, b) in p.base().representatives().iter().zip(bonds.vectors()) {
        assert!((v - b).norm() < 1e-12);
    }
    let unit = PoavR::new(&pyramid(0.2, [1.0; 3]));
    assert!((unit.volume() - unit.base().t0()).abs() < 1e-15);
}

#[test]
fn planar_sp2_end_to_end() {
    let bonds = planar_sp2(1.42);
    for &theta in &bonds.angles().angles {
        assert!((theta - 2.0 * PI / 3.0).abs() < 1e-12);
    }
    let p = Poav1::new(&bonds);
    let sigma_pi = [FRAC_PI_2; 3];
    assert!(p.m(&sigma_pi).unwrap().abs() < 1e-12);
    assert!((p.n(&sigma_pi).unwrap() - 2.0).abs() < 1e-12);
    let h = p.curvature().unwrap();
    assert!(h.is_finite());
    assert!(h.abs() < 1e-12);
    // the π axis magnitude diverges for a flat site
    assert!(matches!(
        p.base().vpi(),
        Err(PoavError::DegenerateGeometry { .. })
    ));
    assert!(p.area().unwrap_err().is_degenerate());

    // POAV2 reduces to sp2 for 120° angles
    let p2 = Poav2::new(&bonds);
    for n in p2.indices().unwrap() {
        assert!((n - 2.0).abs() < 1e-9);
    }
    assert!(p2.m().unwrap().abs() < 1e-9);
    assert!(p2.curvature().unwrap().is_finite());
}

#[test]
fn tetrahedral_reference_values() {
    let bonds = tetrahedral();
    let p2 = Poav2::new(&bonds);
    assert!((p2.cosa12() + 1.0 / 3.0).abs() < 1e-12);
    for n in p2.indices().unwrap() {
        assert!((n - 3.0).abs() < 1e-9, "n = {n}");
    }
    assert!((p2.m().unwrap() - 1.0 / 3.0).abs() < 1e-9);

    // POAV1 with the σ-π angle of an sp3 centre (≈109.47°)
    let p1 = Poav1::new(&bonds);
    let axis = p1.pi_axis().unwrap();
    let sigma_pi = p1.base().unit_bonds().map(|v| PI - v.angle(&axis));
    for a in sigma_pi {
        assert!((a - (-1.0f64 / 3.0).acos()).abs() < 1e-9);
    }
    assert!((p1.m(&sigma_pi).unwrap() - 1.0 / 3.0).abs() < 1e-9);
    assert!((p1.n(&sigma_pi).unwrap() - 3.0).abs() < 1e-9);
}

#[test]
fn poav1_magic_angle_is_degenerate() {
    let p = Poav1::new(&tetrahedral());
    let magic = (1.0f64 / 3f64.sqrt()).acos();
    let err = p.m(&[magic; 3]).unwrap_err();
    assert!(err.is_degenerate(), "{err}");
}

#[test]
fn poav2_right_angles_are_degenerate() {
    let p2 = Poav2::new(&orthonormal());
    assert!(matches!(p2.n1(), Err(PoavError::DegenerateGeometry { .. })));
    assert!(p2.m().is_err());
}

#[test]
fn pyramid_axis_is_symmetry_axis_for_every_variant() {
    let bonds = pyramid(0.3, [1.4, 1.4, 1.4]);
    for kind in PoavKind::ALL {
        let p = Poav::build(kind, &bonds);
        let axis = p.pi_axis().unwrap();
        assert!(axis.z.abs() > 1.0 - 1e-9, "{kind}: {axis:?}");
        // vpi·v_i = 1: the axis sits on the representatives' side. Bonds lean to
        // -z, and POAV2 flips them through cos(θ_opp) < 0, so its axis is +z.
        for v in p.base().representatives() {
            assert!(axis.dot(v) > 0.0, "{kind}");
        }
        let expected_sign = if kind == PoavKind::Poav2 { 1.0 } else { -1.0 };
        assert_eq!(axis.z.signum(), expected_sign, "{kind}");
        assert_eq!(p.kind(), kind);
    }
}

#[test]
fn vpi_is_dual_to_representatives_seeded() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..32 {
        let vs: [Vector3<f64>; 3] = std::array::from_fn(|_| {
            vector![
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0)
            ]
        });
        let Ok(bonds) = BondTriple::from_vectors(vs) else {
            continue;
        };
        let p = PoavR::new(&bonds);
        if p.base().triple_product().abs() < 1e-3 {
            continue;
        }
        let vpi = p.base().vpi().unwrap();
        for v in p.base().representatives() {
            assert!((vpi.dot(v) - 1.0).abs() < 1e-6);
        }
        // stable H agrees with 3T/A
        let h = p.curvature().unwrap();
        let a = p.area().unwrap();
        assert!((h - 3.0 * p.volume() / a).abs() < 1e-9 * (1.0 + h.abs()));
    }
}

#[test]
fn poav2_with_external_angles_uses_opposite_cosines() {
    let bonds = pyramid(0.1, [1.0; 3]);
    let angles = BondAngles::from_slice(&[2.0, 2.05, 2.1]).unwrap();
    let p2 = Poav2::with_angles(&bonds, angles, PoavCfg::default());
    let units = p2.base().unit_bonds();
    let v = p2.base().representatives();
    assert!((v[0] - 2.1f64.cos() * units[0]).norm() < 1e-12);
    assert!((v[1] - 2.05f64.cos() * units[1]).norm() < 1e-12);
    assert!((v[2] - 2.0f64.cos() * units[2]).norm() < 1e-12);
    let expected_t = -(2.0f64.cos() * 2.05f64.cos() * 2.1f64.cos()) * p2.base().t0();
    assert!((p2.volume() - expected_t).abs() < 1e-15);
}

#[test]
fn hybridization_requires_sigma_pi_for_poav1_only() {
    let bonds = pyramid(0.2, [1.4; 3]);
    let p1 = Poav::build(PoavKind::Poav1, &bonds);
    assert_eq!(
        p1.hybridization(None),
        Err(PoavError::MissingData {
            field: "sigma_pi_angles"
        })
    );
    let h2 = Poav::build(PoavKind::Poav2, &bonds).hybridization(None).unwrap();
    assert_eq!(h2.entries().len(), 4);
    let hr = Poav::build(PoavKind::PoavR, &bonds).hybridization(None).unwrap();
    assert!(hr.entries().is_empty());
}

#[test]
fn kind_parses_and_displays() {
    assert_eq!("poav1".parse::<PoavKind>().unwrap(), PoavKind::Poav1);
    assert_eq!("POAV2".parse::<PoavKind>().unwrap(), PoavKind::Poav2);
    assert_eq!("PoavR".parse::<PoavKind>().unwrap(), PoavKind::PoavR);
    assert!("poav3".parse::<PoavKind>().is_err());
    assert_eq!(PoavKind::PoavR.to_string(), "POAVR");
}
