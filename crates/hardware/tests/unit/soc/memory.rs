use pmpsim_core::common::LoadError;
use pmpsim_core::config::Config;
use pmpsim_core::soc::traits::Device;
use pmpsim_core::soc::{Memory, System};
use pretty_assertions::assert_eq;

#[test]
fn little_endian_layout() {
    let mut mem = Memory::new("DMEM", 16);
    mem.write_u32(4, 0x1122_3344);
    assert_eq!(&mem.as_bytes()[4..8], &[0x44, 0x33, 0x22, 0x11]);
    assert_eq!(mem.read_u16(6), 0x1122);
    assert_eq!(mem.read_u8(4), 0x44);
}

#[test]
fn out_of_range_reads_zero() {
    let mut mem = Memory::new("DMEM", 8);
    mem.write_u32(4, 0xFFFF_FFFF);
    assert_eq!(mem.read_u32(8), 0);
    assert_eq!(mem.read_u32(6), 0x0000_FFFF);
    assert_eq!(mem.read_u8(u32::MAX), 0);
}

#[test]
fn writes_that_do_not_fit_are_dropped() {
    let mut mem = Memory::new("DMEM", 8);
    mem.write_u32(6, 0xAABB_CCDD);
    mem.write_u16(7, 0xAABB);
    mem.write_u8(8, 0xAA);
    assert_eq!(mem.as_bytes(), &[0; 8]);
}

#[test]
fn load_and_clear() {
    let mut mem = Memory::new("IMEM", 8);
    assert!(mem.load(&[1, 2, 3], 5));
    assert!(!mem.load(&[1, 2, 3], 6));
    assert_eq!(mem.as_bytes(), &[0, 0, 0, 0, 0, 1, 2, 3]);
    mem.clear();
    assert_eq!(mem.as_bytes(), &[0; 8]);
}

#[test]
fn system_uses_configured_sizes() {
    let mut config = Config::default();
    config.memory.imem_size = 64;
    config.memory.dmem_size = 128;
    let system = System::new(&config);
    assert_eq!(system.imem.size(), 64);
    assert_eq!(system.dmem.size(), 128);
    assert_eq!(system.imem.name(), "IMEM");
}

#[test]
fn system_rejects_oversized_images() {
    let mut config = Config::default();
    config.memory.imem_size = 8;
    let mut system = System::new(&config);

    let err = system.load_program(&[0; 12]).unwrap_err();
    assert!(matches!(
        err,
        LoadError::TooLarge {
            len: 12,
            capacity: 8,
            ..
        }
    ));

    system.load_program(&[0x13, 0, 0, 0]).unwrap();
    assert_eq!(system.imem.read_u32(0), 0x13);
}

#[test]
fn system_loads_data_image() {
    let mut system = System::new(&Config::default());
    system.load_data(&[0xEF, 0xBE, 0xAD, 0xDE]).unwrap();
    assert_eq!(system.dmem.read_u32(0), 0xDEAD_BEEF);
}
