use super::*;
use crate::angles::{pyramidalization_angles, sigma_pi_angles};
use crate::{Poav, PoavAnalysis, PoavKind, PoavResult, PoavSite};
use proptest::prelude::*;

#[test]
fn replay_reproduces_sample() {
    let mut sampler = SiteSampler::new(SiteSampleParams::default(), 11).unwrap();
    let a = sampler.next_sample().unwrap();
    let b = sampler.next_sample().unwrap();
    assert_ne!(a.replay, b.replay);
    assert_eq!(sampler.regenerate(&a.replay).unwrap(), a);
}

#[test]
fn invalid_params_are_rejected() {
    let mut p = SiteSampleParams::default();
    p.bond_length_min = 0.0;
    assert!(SiteSampler::new(p, 0).is_err());
    let mut p = SiteSampleParams::default();
    p.pyramidalization_min = 0.5;
    p.pyramidalization_max = 0.1;
    assert!(SiteSampler::new(p, 0).is_err());
    let mut p = SiteSampleParams::default();
    p.azimuth_jitter = 2.0;
    let err = SiteSampler::new(p, 0).err().unwrap();
    assert!(err.to_string().contains("azimuth_jitter"));
}

#[test]
fn jitter_free_sites_recover_pyramidalization() {
    let params = SiteSampleParams {
        azimuth_jitter: 0.0,
        bond_length_min: 1.42,
        bond_length_max: 1.42,
        ..SiteSampleParams::default()
    };
    let mut sampler = SiteSampler::new(params, 5).unwrap();
    for s in sampler.take_samples(16).unwrap() {
        let poav = Poav::build(PoavKind::Poav1, &s.bonds);
        let axis = poav.pi_axis().unwrap();
        assert!(axis.cross(&s.cone_axis).norm() < 1e-6);
        let p = pyramidalization_angles(&sigma_pi_angles(&poav).unwrap());
        for x in p {
            assert!((x - s.pyramidalization).abs() < 1e-6);
        }
    }
}

fn sample_strategy() -> impl Strategy<Value = SiteSample> {
    (any::<u64>(), 0.02f64..0.5).prop_map(|(seed, pmax)| {
        let params = SiteSampleParams {
            pyramidalization_min: 0.01,
            pyramidalization_max: pmax,
            bond_length_min: 0.8,
            bond_length_max: 2.5,
            ..SiteSampleParams::default()
        };
        SiteSampler::generate_single(&params, seed).expect("valid params")
    })
}

fn finished(kind: PoavKind, s: &SiteSample) -> PoavResult {
    let poav = Poav::build(kind, &s.bonds);
    let sp = sigma_pi_angles(&poav).expect("pyramidalized site has an axis");
    let mut site = PoavSite::new(poav);
    site.set_sigma_pi_angles(&sp).unwrap();
    site.set_pyramidalization_angles(&pyramidalization_angles(&sp)).unwrap();
    site.set_misalignment_angles(&[0.0, 0.0, 0.0]).unwrap();
    site.finalize().unwrap()
}

proptest! {
    #[test]
    fn poav2_index_identity(s in sample_strategy()) {
        let poav = Poav::build(PoavKind::Poav2, &s.bonds);
        let Poav::Poav2(p2) = &poav else { unreachable!() };
        let [n1, n2, n3] = p2.indices().unwrap();
        let m = p2.m().unwrap();
        let lhs = 1.0 / (1.0 + n1) + 1.0 / (1.0 + n2) + 1.0 / (1.0 + n3);
        prop_assert!((lhs - 1.0 / (1.0 + m)).abs() < 1e-9 * (1.0 + lhs.abs()));
    }

    #[test]
    fn poavr_volume_is_length_scaled_t0(s in sample_strategy()) {
        let Poav::PoavR(pr) = Poav::build(PoavKind::PoavR, &s.bonds) else { unreachable!() };
        let [r1, r2, r3] = s.bonds.lengths();
        prop_assert!((pr.base().volume() - r1 * r2 * r3 * pr.base().t0()).abs() < 1e-12);
    }

    #[test]
    fn degree_record_is_scaled_radian_record(s in sample_strategy(), k in 0usize..3) {
        let result = finished(PoavKind::ALL[k], &s);
        let rad = result.todict(false).unwrap();
        let deg = result.todict(true).unwrap();
        for key in crate::ANGLE_KEYS {
            let r = rad.get(key).unwrap();
            let d = deg.get(key).unwrap();
            prop_assert!((d - r * 180.0 / std::f64::consts::PI).abs() < 1e-9);
        }
        prop_assert_eq!(rad.get("H"), deg.get("H"));
    }
}
